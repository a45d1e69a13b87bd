//! The RIS record data model.
//!
//! A [`Record`] maps tags to the ordered values seen for them. Most tags hold a
//! single value, author tags repeat, and lookups of singleton fields take the
//! first non-empty value.

use crate::bibtex::BibEntry;
use crate::mapping::{bib_type_to_ris, split_authors, split_pages};
use crate::ris::tags::RisTag;
use std::collections::HashMap;

/// One bibliographic record in RIS terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    data: HashMap<RisTag, Vec<String>>,
}

impl Record {
    /// Create a new empty Record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag-value pair to the data.
    pub fn add_data(&mut self, tag: RisTag, value: impl Into<String>) {
        self.data.entry(tag).or_default().push(value.into());
    }

    /// Extend the last value of `tag` with a continuation line.
    ///
    /// Abstracts keep line breaks, other tags are joined with a space. Does
    /// nothing if the tag has no value yet.
    pub fn append_continuation(&mut self, tag: &RisTag, text: &str) {
        let separator = if tag.keeps_line_breaks() { '\n' } else { ' ' };
        if let Some(last) = self.data.get_mut(tag).and_then(|values| values.last_mut()) {
            last.push(separator);
            last.push_str(text);
        }
    }

    /// Get the first value for a tag, if it exists.
    pub fn get_first(&self, tag: &RisTag) -> Option<&str> {
        self.data
            .get(tag)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values recorded for a tag, in input order.
    pub fn get_all(&self, tag: &RisTag) -> &[String] {
        self.data.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// The first non-empty value among `tags`, tried in order.
    pub fn first_of(&self, tags: &[RisTag]) -> Option<&str> {
        tags.iter()
            .filter_map(|tag| self.get_first(tag))
            .find(|value| !value.is_empty())
    }

    /// The value list of the first tag in `tags` that has any values.
    pub fn values_of(&self, tags: &[RisTag]) -> &[String] {
        tags.iter()
            .map(|tag| self.get_all(tag))
            .find(|values| !values.is_empty())
            .unwrap_or_default()
    }

    /// Check if the record holds any field.
    pub fn has_content(&self) -> bool {
        !self.data.is_empty()
    }

    /// Number of distinct tags in the record.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over every tag and its values, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&RisTag, &[String])> {
        self.data.iter().map(|(tag, values)| (tag, values.as_slice()))
    }

    /// The `TY` code, if present.
    pub fn entry_type(&self) -> Option<&str> {
        self.first_of(&[RisTag::Type])
    }

    /// Primary title (`TI`, else `T1`).
    pub fn title(&self) -> Option<&str> {
        self.first_of(&[RisTag::Title, RisTag::TitleAlternative])
    }

    /// Personal authors (`AU`, else `A1`).
    pub fn authors(&self) -> &[String] {
        self.values_of(&[RisTag::Author, RisTag::AuthorPrimary])
    }

    /// Get the best journal name based on tag priority.
    pub fn best_journal(&self) -> Option<&str> {
        let mut best_journal = None;
        let mut best_priority = u8::MAX;

        for (tag, values) in &self.data {
            if let Some(priority) = tag.journal_priority() {
                let first = values.first().filter(|value| !value.is_empty());
                if priority < best_priority && first.is_some() {
                    best_priority = priority;
                    best_journal = first.map(String::as_str);
                }
            }
        }

        best_journal
    }
}

impl From<&BibEntry> for Record {
    /// Project a BibTeX entry onto RIS tags.
    fn from(entry: &BibEntry) -> Self {
        let mut record = Record::new();
        record.add_data(RisTag::Type, bib_type_to_ris(&entry.entry_type));

        if let Some(authors) = entry.get("author") {
            for author in split_authors(authors) {
                record.add_data(RisTag::Author, author);
            }
        }

        let mut copy = |tag: RisTag, value: Option<&str>| {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                record.add_data(tag, value);
            }
        };
        copy(RisTag::Title, entry.get("title"));
        copy(RisTag::JournalFullAlternative, entry.journal());
        copy(RisTag::SecondaryTitle, entry.get("booktitle"));
        copy(RisTag::PublicationYear, entry.get("year"));
        copy(RisTag::Volume, entry.get("volume"));
        copy(RisTag::Issue, entry.get("number"));

        let (start, end) = entry.get("pages").map(split_pages).unwrap_or_default();
        copy(RisTag::StartPage, start.as_deref());
        copy(RisTag::EndPage, end.as_deref());

        copy(RisTag::Doi, entry.get("doi"));
        copy(RisTag::Url, entry.get("url"));
        copy(RisTag::Publisher, entry.get("publisher"));
        copy(RisTag::SerialNumber, entry.get("issn"));

        record
    }
}
