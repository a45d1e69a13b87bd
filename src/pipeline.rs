//! Batch conversion of files.
//!
//! A [`Converter`] reads every input file, collects problems with individual
//! files as [`ConversionWarning`]s and renders everything it could read into
//! one output text. The only fatal outcome is having nothing to render.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use ris2bib::{Converter, ConverterConfig, Direction};
//!
//! let config = ConverterConfig {
//!     unique_keys: false,
//!     ..Default::default()
//! };
//! let conversion = Converter::new(Direction::RisToBib)
//!     .with_config(config)
//!     .convert(&["a.ris", "b.ris"], None)
//!     .unwrap();
//! print!("{}", conversion.output);
//! ```
//!
//! ## Mixed inputs
//!
//! [`Converter::convert_mixed`] accepts RIS and BibTeX files together and
//! routes each one by its detected format. Files already in the target format
//! are kept: BibTeX entries are re-keyed, RIS files are copied through as they
//! are, without validation.

use crate::bibtex::{BibEntry, BibReader, BiblatexReader, render_bib, render_entry};
use crate::key::{KeyRegistry, make_key};
use crate::ris::{Record, RisParser, entry_to_ris};
use crate::sniff::detect_format;
use crate::{ConvertError, Direction, Format, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What went wrong with a single input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// The path does not exist.
    MissingFile,
    /// The file was read but held no records of the given format.
    EmptyInput(Format),
    /// The BibTeX reader rejected the file.
    ParseFailure(String),
    /// The file exists but could not be read as UTF-8 text.
    UnreadableFile(String),
    /// Neither the extension nor the content tells RIS from BibTeX.
    UnknownFormat,
}

/// A recoverable problem with one input file. The file is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionWarning {
    pub path: PathBuf,
    pub kind: WarningKind,
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.kind {
            WarningKind::MissingFile => write!(f, "File not found: {path}"),
            WarningKind::EmptyInput(format) => {
                write!(f, "No {} found in: {path}", format.records_noun())
            }
            WarningKind::ParseFailure(reason) => write!(f, "Failed to parse {path}: {reason}"),
            WarningKind::UnreadableFile(reason) => write!(f, "Failed to read {path}: {reason}"),
            WarningKind::UnknownFormat => write!(f, "Unrecognized file format: {path}"),
        }
    }
}

/// The result of a successful batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Rendered text, ending with a newline.
    pub output: String,
    /// Problems with individual inputs, in input order.
    pub warnings: Vec<ConversionWarning>,
}

/// Configuration options for a [`Converter`].
///
/// # Examples
///
/// ```
/// use ris2bib::ConverterConfig;
///
/// let config = ConverterConfig::default();
/// assert!(config.unique_keys);
/// assert_eq!(config.sniff_limit, 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Append `a`, `b`, ... to citation keys already used in the batch.
    pub unique_keys: bool,
    /// Number of characters inspected when a file's format is guessed from
    /// its content.
    pub sniff_limit: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            unique_keys: true,
            sniff_limit: 2000,
        }
    }
}

/// Converts batches of files in one direction.
///
/// BibTeX input is read through a [`BibReader`], [`BiblatexReader`] unless
/// another one is supplied with [`Converter::with_reader`].
#[derive(Debug, Clone)]
pub struct Converter<R = BiblatexReader> {
    direction: Direction,
    config: ConverterConfig,
    reader: R,
}

impl Converter {
    /// Creates a converter with the default configuration.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            config: ConverterConfig::default(),
            reader: BiblatexReader,
        }
    }
}

impl<R: BibReader> Converter<R> {
    #[must_use]
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the BibTeX reader.
    #[must_use]
    pub fn with_reader<S: BibReader>(self, reader: S) -> Converter<S> {
        Converter {
            direction: self.direction,
            config: self.config,
            reader,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert every input from the source format of this converter's
    /// direction, writing the result to `output` when given.
    ///
    /// Records from all inputs are rendered in input order: BibTeX blocks are
    /// separated by a blank line, RIS blocks follow each other directly.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NoRecordsFound`] when no input yields a record, and
    /// [`ConvertError::Io`] when `output` cannot be written.
    pub fn convert<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        output: Option<&Path>,
    ) -> Result<Conversion> {
        let mut run = Run::new(&self.config);

        let blocks: Vec<String> = match self.direction {
            Direction::RisToBib => {
                let records: Vec<Record> = inputs
                    .iter()
                    .flat_map(|path| run.read_ris(path.as_ref()))
                    .collect();
                records
                    .iter()
                    .map(|record| run.render_record(record))
                    .collect()
            }
            Direction::BibToRis => inputs
                .iter()
                .flat_map(|path| run.read_bib(&self.reader, path.as_ref()))
                .map(|entry| entry_to_ris(&entry))
                .collect(),
        };

        if blocks.is_empty() {
            return Err(run.nothing_found(self.direction.source()));
        }

        let mut text = blocks.join(block_separator(self.direction.target()));
        text.push('\n');
        run.finish(text, output)
    }

    /// Convert a mix of RIS and BibTeX files to the target format of this
    /// converter's direction, detecting each file's format.
    ///
    /// Files in the source format are converted. Files already in the target
    /// format are kept: BibTeX entries get fresh citation keys, RIS text is
    /// passed through unchanged. The per-file texts are trimmed and separated
    /// by a blank line.
    ///
    /// # Errors
    ///
    /// Same as [`Converter::convert`].
    pub fn convert_mixed<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        output: Option<&Path>,
    ) -> Result<Conversion> {
        let target = self.direction.target();
        let mut run = Run::new(&self.config);
        let mut chunks = Vec::new();

        for path in inputs {
            let path = path.as_ref();
            if !path.exists() {
                run.warn(path, WarningKind::MissingFile);
                continue;
            }
            let Some(format) = detect_format(path, self.config.sniff_limit) else {
                run.warn(path, WarningKind::UnknownFormat);
                continue;
            };
            debug!("{} detected as {}", path.display(), format);

            let blocks: Vec<String> = match (format, target) {
                (Format::Ris, Format::Bibtex) => run
                    .read_ris(path)
                    .iter()
                    .map(|record| run.render_record(record))
                    .collect(),
                (Format::Bibtex, Format::Bibtex) => run
                    .read_bib(&self.reader, path)
                    .iter()
                    .map(|entry| run.rekey_entry(entry))
                    .collect(),
                (Format::Bibtex, Format::Ris) => run
                    .read_bib(&self.reader, path)
                    .iter()
                    .map(entry_to_ris)
                    .collect(),
                (Format::Ris, Format::Ris) => match run.read_text(path) {
                    Some(text) if text.trim().is_empty() => {
                        run.warn(path, WarningKind::EmptyInput(Format::Ris));
                        Vec::new()
                    }
                    text => text.into_iter().collect(),
                },
            };

            let chunk = blocks.join(block_separator(target));
            let chunk = chunk.trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }
        }

        if chunks.is_empty() {
            return Err(run.nothing_found(self.direction.source()));
        }

        let mut text = chunks.join("\n\n");
        text.push('\n');
        run.finish(text, output)
    }
}

fn block_separator(target: Format) -> &'static str {
    match target {
        Format::Bibtex => "\n\n",
        Format::Ris => "\n",
    }
}

/// State of one `convert` call.
struct Run {
    warnings: Vec<ConversionWarning>,
    keys: Option<KeyRegistry>,
}

impl Run {
    fn new(config: &ConverterConfig) -> Self {
        Self {
            warnings: Vec::new(),
            keys: config.unique_keys.then(KeyRegistry::new),
        }
    }

    fn warn(&mut self, path: &Path, kind: WarningKind) {
        let warning = ConversionWarning {
            path: path.to_path_buf(),
            kind,
        };
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn read_text(&mut self, path: &Path) -> Option<String> {
        if !path.exists() {
            self.warn(path, WarningKind::MissingFile);
            return None;
        }
        match fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(err) => {
                self.warn(path, WarningKind::UnreadableFile(err.to_string()));
                None
            }
        }
    }

    fn read_ris(&mut self, path: &Path) -> Vec<Record> {
        let Some(text) = self.read_text(path) else {
            return Vec::new();
        };
        let records = RisParser::new().parse(&text);
        debug!("Parsed {} RIS records from {}", records.len(), path.display());
        if records.is_empty() {
            self.warn(path, WarningKind::EmptyInput(Format::Ris));
        }
        records
    }

    fn read_bib<R: BibReader>(&mut self, reader: &R, path: &Path) -> Vec<BibEntry> {
        let Some(text) = self.read_text(path) else {
            return Vec::new();
        };
        match reader.read(&text) {
            Ok(entries) => {
                debug!("Parsed {} BibTeX entries from {}", entries.len(), path.display());
                if entries.is_empty() {
                    self.warn(path, WarningKind::EmptyInput(Format::Bibtex));
                }
                entries
            }
            Err(err) => {
                let reason = match err {
                    ConvertError::InvalidFormat(reason) => reason,
                    other => other.to_string(),
                };
                self.warn(path, WarningKind::ParseFailure(reason));
                Vec::new()
            }
        }
    }

    fn assign_key(&mut self, base: String) -> String {
        match &mut self.keys {
            Some(keys) => keys.assign(&base),
            None => base,
        }
    }

    fn render_record(&mut self, record: &Record) -> String {
        let key = self.assign_key(make_key(record));
        render_bib(record, &key)
    }

    fn rekey_entry(&mut self, entry: &BibEntry) -> String {
        let key = self.assign_key(make_key(&Record::from(entry)));
        render_entry(entry, &key)
    }

    fn nothing_found(self, format: Format) -> ConvertError {
        ConvertError::NoRecordsFound {
            format,
            warnings: self.warnings,
        }
    }

    fn finish(self, output: String, path: Option<&Path>) -> Result<Conversion> {
        if let Some(path) = path {
            fs::write(path, &output)?;
            debug!("Wrote {} bytes to {}", output.len(), path.display());
        }
        Ok(Conversion {
            output,
            warnings: self.warnings,
        })
    }
}
