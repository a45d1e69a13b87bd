//! Field mapping between RIS and BibTeX.
//!
//! Every function here is total: unknown inputs map to a documented fallback
//! instead of failing.

use crate::regex::Regex;
use crate::ris::{Record, RisTag};
use crate::utils::collapse_whitespace;
use itertools::Itertools;
use std::sync::LazyLock;

/// BibTeX entry type used for unknown RIS type codes.
pub const DEFAULT_BIB_TYPE: &str = "article";

/// RIS type code used for unknown BibTeX entry types.
pub const DEFAULT_RIS_TYPE: &str = "GEN";

/// RIS type code assumed when a record has no `TY` line.
pub const IMPLIED_RIS_TYPE: &str = "JOUR";

/// BibTeX fields holding the journal name, in order of preference.
pub const BIB_JOURNAL_FIELDS: [&str; 2] = ["journal", "journaltitle"];

/// Year used in keys and BibTeX output when a record has none.
pub const UNKNOWN_YEAR: &str = "0000";

/// Date tags scanned for a publication year, in order of preference.
const YEAR_TAGS: [RisTag; 4] = [
    RisTag::PublicationYear,
    RisTag::DatePrimary,
    RisTag::Date,
    RisTag::DateAccess,
];

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20|21)[0-9]{2}\b").unwrap());

/// Map a RIS type code to a BibTeX entry type.
///
/// ```
/// use ris2bib::mapping::ris_type_to_bib;
///
/// assert_eq!(ris_type_to_bib("CONF"), "inproceedings");
/// assert_eq!(ris_type_to_bib("ELEC"), "article");
/// ```
pub fn ris_type_to_bib(code: &str) -> &'static str {
    match code.trim().to_ascii_uppercase().as_str() {
        "JOUR" | "MGZN" => "article",
        "CONF" | "CPAPER" => "inproceedings",
        "CHAP" => "incollection",
        "BOOK" => "book",
        "RPRT" => "techreport",
        "THES" => "phdthesis",
        "UNPB" => "unpublished",
        _ => DEFAULT_BIB_TYPE,
    }
}

/// Map a BibTeX entry type to a RIS type code.
pub fn bib_type_to_ris(entry_type: &str) -> &'static str {
    match entry_type.trim().to_ascii_lowercase().as_str() {
        "article" | "journal" => "JOUR",
        "inproceedings" | "conference" => "CONF",
        "incollection" | "inbook" => "CHAP",
        "book" => "BOOK",
        "techreport" | "report" => "RPRT",
        "phdthesis" | "mastersthesis" => "THES",
        "unpublished" => "UNPB",
        _ => DEFAULT_RIS_TYPE,
    }
}

/// Join RIS start and end pages into a BibTeX `pages` value.
pub fn join_pages(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start}--{end}")),
        (Some(start), None) => Some(start.to_string()),
        (None, _) => None,
    }
}

/// Split a BibTeX `pages` value into RIS start and end pages.
///
/// Any run of hyphens, en-dashes or em-dashes separates the two; text after a
/// second separator is ignored.
pub fn split_pages(pages: &str) -> (Option<String>, Option<String>) {
    let non_empty = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string);
    match pages.split_once(is_dash) {
        Some((start, rest)) => {
            let end = rest.trim_start_matches(is_dash).split(is_dash).next();
            (non_empty(start), end.and_then(non_empty))
        }
        None => (non_empty(pages), None),
    }
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '\u{2013}' | '\u{2014}')
}

/// Join author names into a BibTeX `author` value.
pub fn join_authors<S: AsRef<str>>(authors: &[S]) -> String {
    authors
        .iter()
        .map(|author| collapse_whitespace(author.as_ref()))
        .join(" and ")
}

/// Split a BibTeX `author` value into individual names.
pub fn split_authors(raw: &str) -> Vec<String> {
    raw.replace('\n', " ")
        .split(" and ")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Escape literal braces for a braced BibTeX value.
///
/// Only `{` and `}` are touched; backslashes and non-ASCII text pass through.
pub fn escape_braces(value: &str) -> String {
    value.replace('{', "\\{").replace('}', "\\}")
}

/// Find a four-digit year starting with 19, 20 or 21 in `text`.
pub fn extract_year(text: &str) -> Option<&str> {
    YEAR.find(text).map(|m| m.as_str())
}

/// The publication year of a record, scanned from `PY`, `Y1`, `DA` then `Y2`.
pub fn publication_year(record: &Record) -> Option<&str> {
    YEAR_TAGS
        .iter()
        .filter_map(|tag| record.get_first(tag))
        .find_map(extract_year)
}
