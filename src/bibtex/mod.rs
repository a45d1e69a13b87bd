//! BibTeX input and output.
//!
//! Reading BibTeX is delegated to the [`biblatex`] crate behind the
//! [`BibReader`] trait; the rest of the crate only sees flat [`BibEntry`]
//! values. Rendering lives in [`render_bib`] and [`render_entry`].
//!
//! # Example
//!
//! ```
//! use ris2bib::{BibReader, BiblatexReader};
//!
//! let input = "@article{x2021, title = {Testing Things}, year = {2021}}";
//! let entries = BiblatexReader.read(input).unwrap();
//!
//! assert_eq!(entries[0].key, "x2021");
//! assert_eq!(entries[0].get("title"), Some("Testing Things"));
//! ```

mod write;

pub use write::{render_bib, render_entry};

use crate::mapping::BIB_JOURNAL_FIELDS;
use crate::{ConvertError, Result};
use biblatex::{Bibliography, ChunksExt, Entry, EntryType, ParseErrorKind};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;
use tracing::debug;

/// A BibTeX entry reduced to its type, key, and plain-text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibEntry {
    /// Lowercase entry type, e.g. `article`
    pub entry_type: String,
    /// Citation key as found in the source
    pub key: String,
    /// Lowercase field names with their values, in reader order
    pub fields: Vec<(String, String)>,
}

impl BibEntry {
    pub fn new(entry_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            key: key.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Names are stored lowercase.
    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .push((name.into().to_ascii_lowercase(), value.into()));
    }

    /// Value of the first field called `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The journal name, from `journal` or else `journaltitle`.
    pub fn journal(&self) -> Option<&str> {
        BIB_JOURNAL_FIELDS
            .iter()
            .filter_map(|name| self.get(name))
            .find(|value| !value.is_empty())
    }
}

impl From<&Entry> for BibEntry {
    fn from(entry: &Entry) -> Self {
        // biblatex displays every type it does not model as `unknown`
        let entry_type = match &entry.entry_type {
            EntryType::Unknown(name) => name.to_ascii_lowercase(),
            known => known.to_string().to_ascii_lowercase(),
        };
        let mut bib_entry = BibEntry::new(entry_type, entry.key.clone());
        for (name, chunks) in &entry.fields {
            bib_entry.push_field(name.as_str(), chunks.format_verbatim());
        }
        bib_entry
    }
}

/// Source of BibTeX entries.
///
/// Implementations turn a whole BibTeX database into entries or fail with
/// [`ConvertError::InvalidFormat`]; the pipeline records such failures as
/// per-file warnings.
pub trait BibReader {
    /// Parse a string containing zero or more BibTeX entries.
    fn read(&self, input: &str) -> Result<Vec<BibEntry>>;
}

/// [`BibReader`] backed by the `biblatex` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiblatexReader;

impl BibReader for BiblatexReader {
    /// Entries sharing a citation key are all kept, in input order.
    fn read(&self, input: &str) -> Result<Vec<BibEntry>> {
        let mut source = Cow::Borrowed(input);
        let mut aliases: HashMap<String, String> = HashMap::new();

        loop {
            let err = match Bibliography::parse(&source) {
                Ok(bibliography) => {
                    return Ok(bibliography
                        .iter()
                        .map(|entry| {
                            let mut bib_entry = BibEntry::from(entry);
                            if let Some(key) = aliases.get(&bib_entry.key) {
                                bib_entry.key = key.clone();
                            }
                            bib_entry
                        })
                        .collect());
                }
                Err(err) => err,
            };

            let ParseErrorKind::DuplicateKey(key) = &err.kind else {
                return Err(ConvertError::InvalidFormat(err.to_string()));
            };
            let alias = unused_alias(&source, key, aliases.len());
            let renamed = rename_key(&source, err.span.clone(), key, &alias)
                .ok_or_else(|| ConvertError::InvalidFormat(err.to_string()))?;
            debug!("Duplicate BibTeX key {key:?} read as {alias:?}");
            aliases.insert(alias, key.clone());
            source = Cow::Owned(renamed);
        }
    }
}

/// A key not occurring anywhere in `source`.
fn unused_alias(source: &str, key: &str, seen: usize) -> String {
    (seen..)
        .map(|n| format!("{key}__dup{n}"))
        .find(|alias| !source.contains(alias.as_str()))
        .unwrap_or_else(|| key.to_string())
}

/// Replace the citation key of the entry at `span` with `alias`.
///
/// `span` may cover the key itself or the whole `@type{key, ...}` entry.
fn rename_key(source: &str, span: Range<usize>, key: &str, alias: &str) -> Option<String> {
    let text = source.get(span.clone())?;
    let lead = text.len() - text.trim_start().len();
    let start = if text[lead..].starts_with('@') {
        let open = text.find(['{', '(', '"'])? + 1;
        let rest = &text[open..];
        span.start + open + (rest.len() - rest.trim_start().len())
    } else {
        span.start + lead
    };
    if !source[start..].starts_with(key) {
        return None;
    }
    Some(format!("{}{alias}{}", &source[..start], &source[start + key.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[test]
    fn test_read_article() {
        let input = r#"@article{x2021,
  author = {Smith, Alice and Johnson, Bob},
  title = {Testing Things},
  journal = {Proceedings of Testing},
  year = {2021},
  pages = {10-20}
}"#;
        let entries = BiblatexReader.read(input).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.entry_type, "article");
        assert_eq!(entry.key, "x2021");
        assert_eq!(entry.get("author"), Some("Smith, Alice and Johnson, Bob"));
        assert_eq!(entry.get("Title"), Some("Testing Things"));
        assert_eq!(entry.journal(), Some("Proceedings of Testing"));
        assert_eq!(entry.get("year"), Some("2021"));
        assert_eq!(entry.get("pages"), Some("10-20"));
    }

    #[test]
    fn test_read_multiple_entries() {
        let input = r#"
@book{b1, title = {First}}
@inproceedings{c1, title = {Second}, booktitle = {Conf}}
"#;
        let entries = BiblatexReader.read(input).unwrap();
        let types: Vec<_> = entries.iter().map(|e| e.entry_type.as_str()).collect();
        assert_eq!(types, vec!["book", "inproceedings"]);
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b1", "c1"]);
    }

    #[rstest]
    #[case("@article{k, title = {T}}", "article")]
    #[case("@Article{k, title = {T}}", "article")]
    #[case("@journal{k, title = {T}}", "journal")]
    #[case("@CustomType{k, title = {T}}", "customtype")]
    fn test_read_keeps_entry_type_name(#[case] input: &str, #[case] expected: &str) {
        let entries = BiblatexReader.read(input).unwrap();
        assert_eq!(entries[0].entry_type, expected);
    }

    #[test]
    fn test_read_duplicate_keys_keeps_every_entry() {
        let input = r#"@article{k, title = {First}}
@article{k, title = {Second}}
@book{ k , title = {Third}}
@misc{other, title = {Fourth}}"#;
        let entries = BiblatexReader.read(input).unwrap();

        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["k", "k", "k", "other"]);
        let titles: Vec<_> = entries.iter().filter_map(|e| e.get("title")).collect();
        assert_eq!(titles, vec!["First", "Second", "Third", "Fourth"]);
    }

    #[rstest]
    #[case(0..21, "@article{k, title={A}}")]
    #[case(9..10, "@article{k, title={A}}")]
    fn test_rename_key_span_forms(#[case] span: Range<usize>, #[case] source: &str) {
        assert_eq!(
            rename_key(source, span, "k", "k__dup0").as_deref(),
            Some("@article{k__dup0, title={A}}")
        );
    }

    #[test]
    fn test_read_empty_database() {
        assert!(BiblatexReader.read("").unwrap().is_empty());
    }

    #[test]
    fn test_read_malformed_input() {
        let result = BiblatexReader.read("@article{broken, title = {Unclosed");
        assert!(matches!(result, Err(ConvertError::InvalidFormat(_))));
    }

    #[test]
    fn test_journal_fallback_field() {
        let mut entry = BibEntry::new("article", "k");
        entry.push_field("journaltitle", "Journal of Fallbacks");
        assert_eq!(entry.journal(), Some("Journal of Fallbacks"));

        entry.push_field("journal", "Journal of Firsts");
        assert_eq!(entry.journal(), Some("Journal of Firsts"));
    }

    #[test]
    fn test_push_field_lowercases_name() {
        let mut entry = BibEntry::new("article", "k");
        entry.push_field("DOI", "10.1/x");
        assert_eq!(entry.fields, vec![("doi".to_string(), "10.1/x".to_string())]);
    }
}
