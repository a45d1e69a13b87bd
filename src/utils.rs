use itertools::Itertools;
use unicode_normalization::UnicodeNormalization;

/// Strips diacritics, lowercases, and keeps only ASCII letters and digits.
///
/// Characters without an ASCII decomposition (e.g. `ß`, CJK) are dropped.
///
/// # Arguments
///
/// * `s` - The text to reduce to a citation key component
pub(crate) fn clean_for_key(s: &str) -> String {
    s.nfkd()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Trims and collapses every whitespace run (including newlines) to one space.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}
