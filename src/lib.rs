//! Convert bibliographic records between RIS and BibTeX.
//!
//! `ris2bib` reads RIS tag-line files and BibTeX databases and renders each
//! into the other format. Records converted to BibTeX receive deterministic
//! citation keys built from the first author's surname, the publication year
//! and the first significant title word.
//!
//! # Key Features
//!
//! - **Tolerant RIS parsing**: continuation lines, missing `ER` terminators and
//!   stray text never make the parser fail.
//! - **BibTeX input** through the [`biblatex`] crate, isolated behind the
//!   [`BibReader`] trait so it can be swapped out.
//! - **Stable citation keys** such as `doe2020example`, with `a`, `b`, ...
//!   suffixes when several records in one batch produce the same key.
//! - **Batch conversion** of many files at once with per-file warnings.
//!
//! # Basic Usage
//!
//! ```rust
//! use ris2bib::{RisParser, bibtex::render_bib, key::make_key};
//!
//! let input = "TY  - JOUR\nAU  - Doe, Jane\nTI  - Example Title\nPY  - 2020\nER  - ";
//!
//! let records = RisParser::new().parse(input);
//! let key = make_key(&records[0]);
//! assert_eq!(key, "doe2020example");
//!
//! let bib = render_bib(&records[0], &key);
//! assert!(bib.starts_with("@article{doe2020example,"));
//! ```
//!
//! # Converting Files
//!
//! ```rust,no_run
//! use std::path::Path;
//! use ris2bib::{Converter, Direction};
//!
//! let conversion = Converter::new(Direction::RisToBib)
//!     .convert(&["refs.ris"], Some(Path::new("refs.bib")))
//!     .unwrap();
//!
//! for warning in &conversion.warnings {
//!     eprintln!("[warn] {warning}");
//! }
//! ```
//!
//! # Error Handling
//!
//! Problems with individual files are collected as
//! [`ConversionWarning`](pipeline::ConversionWarning)s. The only fatal
//! condition of a batch is [`ConvertError::NoRecordsFound`]:
//!
//! ```rust
//! use ris2bib::{Converter, ConvertError, Direction};
//!
//! let result = Converter::new(Direction::RisToBib).convert::<&str>(&[], None);
//! assert!(matches!(result, Err(ConvertError::NoRecordsFound { .. })));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod bibtex;
pub mod key;
pub mod mapping;
pub mod pipeline;
mod regex;
pub mod ris;
pub mod sniff;
mod utils;

// Reexports
pub use bibtex::{BibEntry, BibReader, BiblatexReader};
pub use pipeline::{Conversion, ConversionWarning, Converter, ConverterConfig};
pub use ris::{Record, RisParser};

/// A specialized Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that abort a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    InvalidFormat(String),

    /// Nothing could be converted. Carries the per-file warnings gathered
    /// before giving up.
    #[error("No {} found.", .format.records_noun())]
    NoRecordsFound {
        format: Format,
        warnings: Vec<ConversionWarning>,
    },
}

/// The two bibliographic text formats handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Ris,
    Bibtex,
}

impl Format {
    /// How records of this format are called in user-facing messages.
    pub fn records_noun(self) -> &'static str {
        match self {
            Format::Ris => "RIS records",
            Format::Bibtex => "BibTeX entries",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Ris => f.write_str("RIS"),
            Format::Bibtex => f.write_str("BibTeX"),
        }
    }
}

/// Direction of a batch conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    RisToBib,
    BibToRis,
}

impl Direction {
    /// Format of the files read by this direction.
    pub fn source(self) -> Format {
        match self {
            Direction::RisToBib => Format::Ris,
            Direction::BibToRis => Format::Bibtex,
        }
    }

    /// Format of the text produced by this direction.
    pub fn target(self) -> Format {
        match self {
            Direction::RisToBib => Format::Bibtex,
            Direction::BibToRis => Format::Ris,
        }
    }

    /// The direction that produces `format`.
    pub fn producing(format: Format) -> Self {
        match format {
            Format::Bibtex => Direction::RisToBib,
            Format::Ris => Direction::BibToRis,
        }
    }
}
