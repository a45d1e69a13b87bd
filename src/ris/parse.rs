//! RIS format parsing implementation.
//!
//! This module handles the low-level parsing of RIS formatted text. Parsing is
//! total: any input yields a (possibly empty) list of records.

use crate::regex::Regex;
use crate::ris::structure::Record;
use crate::ris::tags::RisTag;
use either::{Either, Left, Right};
use std::sync::LazyLock;

/// `XX  - value`: two uppercase letters or digits, two spaces, a hyphen.
static TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z0-9]{2})  -\s*(.*)$").unwrap());

/// Parse RIS lines into records.
///
/// A record is closed by an `ER` tag-line or by the end of input. Lines that are
/// not tag-lines continue the value of the most recent tag; before the first
/// tag of a record they are dropped. Blank lines only continue abstracts.
pub(crate) fn ris_parse<'a, I>(lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();
    let mut current = Record::new();
    let mut last_tag: Option<RisTag> = None;

    for line in lines {
        match classify_line(line) {
            Right((RisTag::EndOfReference, _)) => {
                if current.has_content() {
                    records.push(std::mem::take(&mut current));
                }
                last_tag = None;
            }
            Right((tag, value)) => {
                current.add_data(tag.clone(), value);
                last_tag = Some(tag);
            }
            Left(text) => match &last_tag {
                // a blank line is a paragraph break in abstracts, elsewhere nothing
                Some(tag) if text.is_empty() && !tag.keeps_line_breaks() => {}
                Some(tag) => current.append_continuation(tag, text),
                None => {}
            },
        }
    }

    // Flush a record left open by a missing ER
    if current.has_content() {
        records.push(current);
    }

    records
}

/// Whether `line` is an RIS tag-line.
pub(crate) fn is_tag_line(line: &str) -> bool {
    TAG_LINE.is_match(line.trim_end_matches('\r'))
}

/// Split a line into either a tag and its trimmed value, or trimmed free text.
fn classify_line(line: &str) -> Either<&str, (RisTag, &str)> {
    let line = line.trim_end_matches('\r');
    match TAG_LINE.captures(line) {
        Some(caps) => {
            let tag = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str());
            Right((RisTag::from_tag(tag), value.trim()))
        }
        None => Left(line.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("TY  - JOUR", RisTag::Type, "JOUR")]
    #[case("TI  - Test Title", RisTag::Title, "Test Title")]
    #[case("AU  - Smith, John", RisTag::Author, "Smith, John")]
    #[case("ER  -", RisTag::EndOfReference, "")]
    #[case("ER  - ", RisTag::EndOfReference, "")]
    #[case("DO  - 10.1000/test  ", RisTag::Doi, "10.1000/test")]
    #[case("T1  -Tight value", RisTag::TitleAlternative, "Tight value")]
    #[case("Y1  - 2020\r", RisTag::DatePrimary, "2020")]
    fn test_classify_tag_line(
        #[case] line: &str,
        #[case] expected_tag: RisTag,
        #[case] expected_value: &str,
    ) {
        assert_eq!(classify_line(line), Right((expected_tag, expected_value)));
    }

    #[rstest]
    #[case("", "")]
    #[case("   continued text  ", "continued text")]
    #[case("ty  - JOUR", "ty  - JOUR")]
    #[case("TY - JOUR", "TY - JOUR")]
    #[case("TYP  - JOUR", "TYP  - JOUR")]
    #[case(" TY  - JOUR", "TY  - JOUR")]
    #[case("!!  - Invalid tag", "!!  - Invalid tag")]
    fn test_classify_free_text(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(classify_line(line), Left(expected));
    }

    #[test]
    fn test_parse_simple_record() {
        let input = "TY  - JOUR\nTI  - Test Article\nAU  - Smith, John\nER  - ";

        let result = ris_parse(input.lines());
        assert_eq!(result.len(), 1);

        let record = &result[0];
        assert_eq!(record.entry_type(), Some("JOUR"));
        assert_eq!(record.title(), Some("Test Article"));
        assert_eq!(record.authors(), ["Smith, John".to_string()]);
    }

    #[test]
    fn test_parse_multiple_records() {
        let input = r#"TY  - JOUR
TI  - First Article
AU  - Smith, John
ER  -

TY  - BOOK
TI  - Second Article
AU  - Doe, Jane
ER  -"#;

        let result = ris_parse(input.lines());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].entry_type(), Some("JOUR"));
        assert_eq!(result[1].entry_type(), Some("BOOK"));
    }

    #[test]
    fn test_record_count_matches_closing_er_lines() {
        let input = "ER  - \nER  - \nTY  - JOUR\nER  - \nER  - \nTI  - Untyped\nER  - \n";
        assert_eq!(ris_parse(input.lines()).len(), 2);
    }

    #[test]
    fn test_parse_flushes_on_eof() {
        let input = "TY  - JOUR\nTI  - Closed\nER  - \nTY  - BOOK\nTI  - Open";
        let result = ris_parse(input.lines());
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].title(), Some("Open"));
    }

    #[test]
    fn test_parse_repeated_authors_keep_order() {
        let input = "AU  - Doe, Jane\nAU  - Roe, John\nAU  - Poe, Edgar\n";
        let result = ris_parse(input.lines());
        assert_eq!(
            result[0].authors(),
            [
                "Doe, Jane".to_string(),
                "Roe, John".to_string(),
                "Poe, Edgar".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_continuation_lines() {
        let input = r#"TY  - JOUR
TI  - A title that
      wraps onto a second line
AB  - First abstract line.
  Second abstract line.
N2  - Note one
Note two
ER  - "#;

        let result = ris_parse(input.lines());
        let record = &result[0];
        assert_eq!(record.title(), Some("A title that wraps onto a second line"));
        assert_eq!(
            record.get_first(&RisTag::Abstract),
            Some("First abstract line.\nSecond abstract line.")
        );
        assert_eq!(
            record.get_first(&RisTag::AbstractAlternative),
            Some("Note one\nNote two")
        );
    }

    #[rstest]
    #[case("AB  - Para one.\n\nPara two.\nER  - ", RisTag::Abstract, "Para one.\n\nPara two.")]
    #[case("N2  - Note one.\n\n  Note two.\nER  - ", RisTag::AbstractAlternative, "Note one.\n\nNote two.")]
    #[case("TI  - A title\n\ncontinued\nER  - ", RisTag::Title, "A title continued")]
    fn test_blank_line_continuations(
        #[case] input: &str,
        #[case] tag: RisTag,
        #[case] expected: &str,
    ) {
        let result = ris_parse(input.lines());
        assert_eq!(result[0].get_first(&tag), Some(expected));
    }

    #[test]
    fn test_blank_lines_between_records_are_ignored() {
        let input = "TY  - JOUR\nTI  - One\nER  - \n\n\nTY  - BOOK\nTI  - Two\nER  - \n";
        let result = ris_parse(input.lines());
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].title(), Some("Two"));
    }

    #[test]
    fn test_continuation_extends_last_value_only() {
        let input = "AU  - Doe,\nAU  - Roe,\nJohn\n";
        let result = ris_parse(input.lines());
        assert_eq!(
            result[0].authors(),
            ["Doe,".to_string(), "Roe, John".to_string()]
        );
    }

    #[test]
    fn test_leading_free_text_is_dropped() {
        let input = r#"Record #1 of 2
Provider: Test Provider

TY  - JOUR
TI  - Test Article
ER  -
Database: trailing metadata"#;

        let result = ris_parse(input.lines());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 2);
        assert_eq!(result[0].title(), Some("Test Article"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(ris_parse("".lines()).is_empty());
        assert!(ris_parse("\n\n   \n".lines()).is_empty());
    }

    #[test]
    fn test_parse_unknown_tags_are_kept() {
        let result = ris_parse("TY  - JOUR\nZ9  - custom\n".lines());
        assert_eq!(
            result[0].get_first(&RisTag::from_tag("Z9")),
            Some("custom")
        );
    }

    #[rstest]
    #[case("TY  - JOUR", true)]
    #[case("ER  -\r", true)]
    #[case("@article{key,", false)]
    #[case("Provider: Some Provider", false)]
    fn test_is_tag_line(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_tag_line(line), expected);
    }
}
