use clap::{Parser, Subcommand, ValueEnum};
use ris2bib::{Conversion, ConvertError, Converter, ConverterConfig, Direction, Format};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "ris2bib",
    about = "Convert bibliographic records between RIS and BibTeX",
    version
)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Do not append a, b, ... to repeated citation keys
    #[arg(long, global = true)]
    keep_duplicate_keys: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert RIS files to BibTeX
    ToBib {
        /// RIS files to read
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert BibTeX files to RIS
    ToRis {
        /// BibTeX files to read
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a mix of RIS and BibTeX files, detecting each file's format
    Convert {
        /// Output format
        #[arg(long, value_enum)]
        to: Target,

        /// Files to read
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Bib,
    Ris,
}

impl From<Target> for Format {
    fn from(target: Target) -> Self {
        match target {
            Target::Bib => Format::Bibtex,
            Target::Ris => Format::Ris,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ConverterConfig {
        unique_keys: !cli.keep_duplicate_keys,
        ..Default::default()
    };

    let (result, output) = match &cli.command {
        Commands::ToBib { inputs, output } => (
            Converter::new(Direction::RisToBib)
                .with_config(config)
                .convert(inputs, output.as_deref()),
            output,
        ),
        Commands::ToRis { inputs, output } => (
            Converter::new(Direction::BibToRis)
                .with_config(config)
                .convert(inputs, output.as_deref()),
            output,
        ),
        Commands::Convert { to, inputs, output } => (
            Converter::new(Direction::producing((*to).into()))
                .with_config(config)
                .convert_mixed(inputs, output.as_deref()),
            output,
        ),
    };

    match result {
        Ok(conversion) => {
            report(&conversion, output.as_deref());
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let ConvertError::NoRecordsFound { warnings, .. } = &err {
                for warning in warnings {
                    eprintln!("[warn] {warning}");
                }
            }
            eprintln!("[error] {err}");
            ExitCode::FAILURE
        }
    }
}

fn report(conversion: &Conversion, output: Option<&Path>) {
    for warning in &conversion.warnings {
        eprintln!("[warn] {warning}");
    }
    match output {
        Some(path) => println!("[info] Wrote {}", path.display()),
        None => print!("{}", conversion.output),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ris2bib=debug" } else { "off" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
