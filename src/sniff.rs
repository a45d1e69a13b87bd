//! Guess whether a file holds RIS or BibTeX.
//!
//! The extension decides when it is `.ris` or `.bib`; otherwise the beginning
//! of the file is inspected.

use crate::Format;
use crate::ris::is_tag_line;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Detect the format of the file at `path`.
///
/// Content sniffing looks at no more than `limit` characters. Returns `None`
/// when the format cannot be told or the file cannot be read.
pub fn detect_format(path: &Path, limit: usize) -> Option<Format> {
    if let Some(format) = format_from_extension(path) {
        return Some(format);
    }

    // A char is at most four bytes
    let mut bytes = Vec::new();
    let read = File::open(path).and_then(|file| {
        file.take(limit.saturating_mul(4) as u64)
            .read_to_end(&mut bytes)
    });
    if let Err(err) = read {
        debug!("Cannot sniff {}: {}", path.display(), err);
        return None;
    }

    sniff_content(&String::from_utf8_lossy(&bytes), limit)
}

/// Guess the format of `text` from its first `limit` characters.
///
/// Any RIS tag-line means RIS, otherwise an `@` means BibTeX.
///
/// ```
/// use ris2bib::{Format, sniff::sniff_content};
///
/// assert_eq!(sniff_content("TY  - JOUR\nER  - ", 2000), Some(Format::Ris));
/// assert_eq!(sniff_content("@book{k, title={T}}", 2000), Some(Format::Bibtex));
/// assert_eq!(sniff_content("hello", 2000), None);
/// ```
pub fn sniff_content(text: &str, limit: usize) -> Option<Format> {
    let head = match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    };
    let head = head.trim_start_matches('\u{feff}');

    if head.lines().any(is_tag_line) {
        Some(Format::Ris)
    } else if head.contains('@') {
        Some(Format::Bibtex)
    } else {
        None
    }
}

fn format_from_extension(path: &Path) -> Option<Format> {
    let extension = path.extension()?.to_str()?;
    if extension.eq_ignore_ascii_case("ris") {
        Some(Format::Ris)
    } else if extension.eq_ignore_ascii_case("bib") {
        Some(Format::Bibtex)
    } else {
        None
    }
}
