//! BibTeX block rendering.

use super::BibEntry;
use crate::mapping::{
    IMPLIED_RIS_TYPE, UNKNOWN_YEAR, escape_braces, join_authors, join_pages, publication_year,
    ris_type_to_bib,
};
use crate::ris::{Record, RisTag};
use std::fmt::Write;

/// Entry types that carry a `publisher` field when converted from RIS.
const PUBLISHER_TYPES: [&str; 3] = ["article", "inproceedings", "incollection"];

/// Render a RIS record as a BibTeX block under `key`.
///
/// Fields are written in a fixed order (title, author, journal, year, volume,
/// number, pages, doi, url, issn, publisher, abstract) and absent fields are
/// left out, except `year`, which is `0000` when no year is found.
///
/// ```
/// use ris2bib::{RisParser, bibtex::render_bib};
///
/// let records = RisParser::new().parse("TY  - BOOK\nTI  - A {Braced} Title\nER  - ");
/// assert_eq!(
///     render_bib(&records[0], "key"),
///     "@book{key,\n  title      = {A \\{Braced\\} Title},\n  year       = {0000}\n}"
/// );
/// ```
pub fn render_bib(record: &Record, key: &str) -> String {
    let entry_type = ris_type_to_bib(record.entry_type().unwrap_or(IMPLIED_RIS_TYPE));
    let first = |tags: &[RisTag]| record.first_of(tags).map(str::to_string);

    let authors = Some(join_authors(record.authors())).filter(|a| !a.is_empty());
    let pages = join_pages(
        record.first_of(&[RisTag::StartPage]),
        record.first_of(&[RisTag::EndPage]),
    );
    let publisher = first(&[RisTag::Publisher]).filter(|_| PUBLISHER_TYPES.contains(&entry_type));

    let fields = [
        ("title", record.title().map(str::to_string)),
        ("author", authors),
        ("journal", record.best_journal().map(str::to_string)),
        ("year", Some(publication_year(record).unwrap_or(UNKNOWN_YEAR).to_string())),
        ("volume", first(&[RisTag::Volume])),
        ("number", first(&[RisTag::Issue])),
        ("pages", pages),
        ("doi", first(&[RisTag::Doi, RisTag::TypeOfWork])),
        ("url", first(&[RisTag::Url])),
        ("issn", first(&[RisTag::SerialNumber])),
        ("publisher", publisher),
        ("abstract", first(&[RisTag::Abstract, RisTag::AbstractAlternative])),
    ];

    write_block(
        entry_type,
        key,
        fields
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|value| (*name, value))),
    )
}

/// Render a parsed BibTeX entry under a new `key`, keeping its fields.
pub fn render_entry(entry: &BibEntry, key: &str) -> String {
    write_block(
        &entry.entry_type,
        key,
        entry
            .fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )
}

/// `@type{key,` then one padded `name = {value},` line per field, without a
/// comma after the last field.
fn write_block<'a>(
    entry_type: &str,
    key: &str,
    fields: impl Iterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut out = format!("@{entry_type}{{{key},");
    let mut any_field = false;
    for (name, value) in fields {
        if any_field {
            out.push(',');
        }
        let _ = write!(out, "\n  {name:<11}= {{{}}}", escape_braces(value));
        any_field = true;
    }
    out.push_str("\n}");
    out
}
