//! Citation key generation.
//!
//! A key is `{surname}{year}{word}`: the first author's surname, the
//! publication year and the first significant title word, each lowercased with
//! diacritics and punctuation removed. [`make_key`] is a pure function;
//! collisions within a batch are resolved by a [`KeyRegistry`].
//!
//! # Example
//!
//! ```
//! use ris2bib::{RisParser, key::{KeyRegistry, make_key}};
//!
//! let records = RisParser::new().parse(
//!     "TY  - JOUR\nAU  - Müller, Jörg\nTI  - On the Origin of Keys\nPY  - 1999\nER  - ",
//! );
//! let key = make_key(&records[0]);
//! assert_eq!(key, "muller1999origin");
//!
//! let mut registry = KeyRegistry::new();
//! assert_eq!(registry.assign(&key), "muller1999origin");
//! assert_eq!(registry.assign(&key), "muller1999origina");
//! ```

use crate::mapping::{UNKNOWN_YEAR, publication_year};
use crate::ris::{Record, RisTag};
use crate::utils::clean_for_key;
use std::collections::HashMap;

/// Words skipped when picking the significant title word.
pub const STOPWORDS: [&str; 31] = [
    "the", "a", "an", "on", "of", "and", "for", "to", "in", "with", "by", "from", "at", "into",
    "over", "under", "between", "within", "without", "across", "is", "are", "via", "using",
    "based", "towards", "toward", "as", "per", "vs", "versus",
];

/// Tags tried for a surname when the record lists no personal author.
const CORPORATE_TAGS: [RisTag; 4] = [
    RisTag::AuthorSecondary,
    RisTag::AuthorTertiary,
    RisTag::AuthorSubsidiary,
    RisTag::Custom1,
];

const NO_AUTHOR: &str = "anon";
const NO_TITLE: &str = "untitled";

/// Derive the base citation key of a record.
pub fn make_key(record: &Record) -> String {
    let mut key = surname(record);
    key.push_str(publication_year(record).unwrap_or(UNKNOWN_YEAR));
    key.push_str(&title_word(record.title().unwrap_or_default()));
    key
}

fn surname(record: &Record) -> String {
    let author = record
        .authors()
        .iter()
        .map(String::as_str)
        .find(|author| !author.is_empty())
        .or_else(|| record.first_of(&CORPORATE_TAGS));

    author
        .map(|name| name.split(',').next().unwrap_or_default())
        .map(clean_for_key)
        .filter(|surname| !surname.is_empty())
        .unwrap_or_else(|| NO_AUTHOR.to_string())
}

/// The first title word that is not a stopword, or the first word if all are.
fn title_word(title: &str) -> String {
    let words: Vec<&str> = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    words
        .iter()
        .find(|word| !is_stopword(word))
        .or(words.first())
        .map(|word| clean_for_key(word))
        .filter(|word| !word.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

fn is_stopword(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOPWORDS.contains(&lower.as_str())
}

/// Hands out unique keys for one batch.
///
/// The first request for a base key gets it unchanged; later requests get
/// `a`, `b`, ... `z`, `aa`, `ab`, ... appended, in request order.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    seen: HashMap<String, usize>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more use of `base` and return the key to emit for it.
    pub fn assign(&mut self, base: &str) -> String {
        let count = self.seen.entry(base.to_string()).or_default();
        let key = match *count {
            0 => base.to_string(),
            n => format!("{base}{}", suffix(n)),
        };
        *count += 1;
        key
    }

    /// Number of distinct base keys seen so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Letter suffix for the `n`th duplicate (1 → `a`, 26 → `z`, 27 → `aa`).
fn suffix(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RisParser;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn key_of(input: &str) -> String {
        make_key(&RisParser::new().parse(input)[0])
    }

    #[test]
    fn test_make_key_example() {
        let input = "TY  - JOUR\nAU  - Doe, Jane\nAU  - Roe, John\nTI  - Example Title About Science\nJO  - Journal of Examples\nPY  - 2020\nER  - ";
        assert_eq!(key_of(input), "doe2020example");
    }

    #[test]
    fn test_make_key_is_deterministic() {
        let records = RisParser::new().parse("AU  - Poe, Edgar\nTI  - The Raven\nY1  - 1845///\nER  - ");
        let first = make_key(&records[0]);
        assert_eq!(first, make_key(&records[0]));
        assert_eq!(first, make_key(&records[0].clone()));
    }

    #[rstest]
    #[case("AU  - Doe, Jane\nTI  - The Of And\nPY  - 2020", "doe2020the")]
    #[case("AU  - Doe, Jane\nTI  - A Study of Things\nPY  - 2020", "doe2020study")]
    #[case("AU  - Doe, Jane\nTI  - On-line learning: a survey", "doe0000line")]
    #[case("AU  - Doe, Jane\nTI  - Über die Dinge", "doe0000uber")]
    #[case("AU  - Doe, Jane\nTI  - ...", "doe0000untitled")]
    #[case("AU  - Doe, Jane\nTI  - 李", "doe0000untitled")]
    #[case("AU  - Doe, Jane", "doe0000untitled")]
    fn test_title_word(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(key_of(input), expected);
    }

    #[rstest]
    #[case("A1  - Núñez, Ana\nTI  - Data", "nunez0000data")]
    #[case("AU  - O'Brien, Pat\nTI  - Data", "obrien0000data")]
    #[case("AU  - Plato\nTI  - Republic", "plato0000republic")]
    #[case("A2  - World Health Organization\nTI  - Report", "worldhealthorganization0000report")]
    #[case("C1  - CERN\nTI  - Report", "cern0000report")]
    #[case("AU  - \nA2  - Editor, Ed\nTI  - Data", "editor0000data")]
    #[case("TI  - Anonymous Work", "anon0000anonymous")]
    #[case("AU  - 李, 雷\nTI  - Data", "anon0000data")]
    fn test_surname(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(key_of(input), expected);
    }

    #[rstest]
    #[case("PY  - 2021\nY1  - 1999", "anon2021untitled")]
    #[case("PY  - n.d.\nY1  - 1999///", "anon1999untitled")]
    #[case("DA  - 2005/03/01", "anon2005untitled")]
    #[case("Y2  - 2024/01/01", "anon2024untitled")]
    #[case("KW  - 2024", "anon0000untitled")]
    fn test_year(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(key_of(input), expected);
    }

    #[test]
    fn test_registry_collisions() {
        let mut registry = KeyRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.assign("doe2020example"), "doe2020example");
        assert_eq!(registry.assign("roe2019other"), "roe2019other");
        assert_eq!(registry.assign("doe2020example"), "doe2020examplea");
        assert_eq!(registry.assign("doe2020example"), "doe2020exampleb");
        assert_eq!(registry.len(), 2);
    }

    #[rstest]
    #[case(1, "a")]
    #[case(2, "b")]
    #[case(26, "z")]
    #[case(27, "aa")]
    #[case(28, "ab")]
    #[case(52, "az")]
    #[case(53, "ba")]
    #[case(702, "zz")]
    #[case(703, "aaa")]
    fn test_suffix(#[case] n: usize, #[case] expected: &str) {
        assert_eq!(suffix(n), expected);
    }
}
