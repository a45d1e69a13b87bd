//! RIS format parser and writer.
//!
//! Provides a tolerant parser for RIS formatted text and the RIS block
//! renderer used when converting BibTeX entries.
//!
//! # Example
//!
//! ```
//! use ris2bib::RisParser;
//!
//! let input = r#"TY  - JOUR
//! TI  - Example Title
//! AU  - Smith, John
//! ER  -"#;
//!
//! let parser = RisParser::new();
//!
//! let records = parser.parse(input);
//! assert_eq!(records[0].title(), Some("Example Title"));
//! ```

mod parse;
mod structure;
mod tags;
mod write;

pub(crate) use parse::is_tag_line;
use parse::ris_parse;
pub use structure::Record;
pub use tags::RisTag;
pub use write::{entry_to_ris, render_ris};

/// Parser for RIS format records.
///
/// RIS is a standardized format for bibliographic citations that uses two-letter
/// tags at the start of each line to denote different citation fields.
#[derive(Debug, Clone, Default)]
pub struct RisParser;

impl RisParser {
    /// Creates a new RIS parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use ris2bib::RisParser;
    /// let parser = RisParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses a string containing zero or more RIS records.
    ///
    /// Never fails: text that is not RIS simply produces no records.
    pub fn parse(&self, input: &str) -> Vec<Record> {
        self.parse_lines(input.trim_start_matches('\u{feff}').lines())
    }

    /// Parses RIS records from an iterator of lines.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ris_parse(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_ris() {
        let input = r#"TY  - JOUR
TI  - Test Article Title
AU  - Smith, John
JO  - Test Journal
PY  - 2023/12/25/Christmas edition
VL  - 10
IS  - 2
SP  - 100
EP  - 110
DO  - 10.1000/test
AB  - This is a test abstract.
KW  - Keyword1
KW  - Keyword2
ER  -

"#;
        let parser = RisParser::new();
        let result = parser.parse(input);
        assert_eq!(result.len(), 1);
        let record = &result[0];
        assert_eq!(record.entry_type(), Some("JOUR"));
        assert_eq!(record.title(), Some("Test Article Title"));
        assert_eq!(record.authors().len(), 1);
        assert_eq!(record.best_journal(), Some("Test Journal"));
        assert_eq!(record.get_all(&RisTag::Keywords).len(), 2);
    }

    #[test]
    fn test_parse_gs_format() {
        let input = r#"TY  - JOUR
T1  - Albendazole therapy in children with focal seizures and single small enhancing computerized tomographic lesions: a randomized, placebo-controlled, double blind trial
A1  - Baranwal, Arun K
A1  - Singhi, Pratibha D
A1  - Khandelwal, N
A1  - Singhi, Sunit C
JO  - The Pediatric infectious disease journal
VL  - 17
IS  - 8
SP  - 696
EP  - 700
SN  - 0891-3668
Y1  - 1998///
PB  - LWW
ER  -


TY  - JOUR
T1  - High-dose praziquantel with cimetidine for refractory neurocysticercosis: a case report with clinical and MRI follow-up.
A1  - Yee, Thomas
A1  - Barakos, Jerome A
A1  - Knight, Robert T
JO  - Western journal of medicine
VL  - 170
IS  - 2
SP  - 112
Y1  - 1999
PB  - BMJ Publishing Group
ER  -

"#;
        let records = RisParser::new().parse(input);
        assert_eq!(records.len(), 2, "Expected 2 records in Google Scholar format");
        assert_eq!(records[0].authors().len(), 4);
        assert_eq!(records[1].get_first(&RisTag::DatePrimary), Some("1999"));
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let records = RisParser::new().parse("\u{feff}TY  - JOUR\nTI  - Marked\nER  - ");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry_type(), Some("JOUR"));
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let records = RisParser::new().parse("TY  - BOOK\r\nTI  - Windows\r\nER  - \r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), Some("Windows"));
    }

    #[test]
    fn test_parse_not_ris() {
        assert!(RisParser::new().parse("@article{x, title={Nope}}").is_empty());
    }
}
