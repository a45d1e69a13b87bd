//! RIS block rendering.

use crate::bibtex::BibEntry;
use crate::mapping::DEFAULT_RIS_TYPE;
use crate::ris::structure::Record;
use crate::ris::tags::RisTag;
use std::fmt::Write;

/// Singleton tags written after the authors, in output order.
const FIELD_ORDER: [RisTag; 12] = [
    RisTag::Title,
    RisTag::JournalFullAlternative,
    RisTag::SecondaryTitle,
    RisTag::PublicationYear,
    RisTag::Volume,
    RisTag::Issue,
    RisTag::StartPage,
    RisTag::EndPage,
    RisTag::Doi,
    RisTag::Url,
    RisTag::Publisher,
    RisTag::SerialNumber,
];

/// Render a record as one RIS block.
///
/// The block starts with `TY`, lists every `AU` value, then the singleton
/// fields in a fixed order and ends with a bare `ER  - ` line (no trailing
/// newline). Empty fields are skipped.
pub fn render_ris(record: &Record) -> String {
    let mut out = String::new();
    let entry_type = record.entry_type().unwrap_or(DEFAULT_RIS_TYPE);
    push_line(&mut out, &RisTag::Type, entry_type);

    for author in record.get_all(&RisTag::Author) {
        if !author.is_empty() {
            push_line(&mut out, &RisTag::Author, author);
        }
    }

    for tag in &FIELD_ORDER {
        if let Some(value) = record.first_of(std::slice::from_ref(tag)) {
            push_line(&mut out, tag, value);
        }
    }

    let _ = write!(out, "{}  - ", RisTag::EndOfReference);
    out
}

/// Render a BibTeX entry as one RIS block.
pub fn entry_to_ris(entry: &BibEntry) -> String {
    render_ris(&Record::from(entry))
}

fn push_line(out: &mut String, tag: &RisTag, value: &str) {
    let _ = writeln!(out, "{tag}  - {value}");
}
