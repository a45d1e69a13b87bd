//! The regex engine used by the RIS tag-line and year patterns.
//!
//! `regex` is the default; the `lite` feature swaps in `regex_lite` for smaller binaries.

#[cfg(feature = "lite")]
pub(crate) use ::regex_lite::Regex;
#[cfg(all(feature = "regex", not(feature = "lite")))]
pub(crate) use ::regex::Regex;

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("ris2bib requires the \"regex\" or \"lite\" feature to be enabled");
