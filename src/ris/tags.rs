//! RIS format tags and their definitions.
//!
//! This module defines the RIS tags the converter reads or writes; every other
//! two-character tag is kept verbatim as [`RisTag::Unknown`].
//! See: http://en.wikipedia.org/wiki/RIS_(file_format)

use compact_str::CompactString;
use std::fmt;

/// RIS format tags.
///
/// RIS (Research Information Systems) is a standardized tag format developed by
/// Research Information Systems for expressing bibliographic citations.
#[allow(clippy::upper_case_acronyms)]
#[non_exhaustive]
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum RisTag {
    /// TY - Type of reference
    Type,
    /// TI - Primary title
    Title,
    /// T1 - Primary title (alternative)
    TitleAlternative,
    /// AU - Author
    Author,
    /// A1 - Primary author
    AuthorPrimary,
    /// A2 - Secondary author (Editor, if any)
    AuthorSecondary,
    /// A3 - Tertiary author
    AuthorTertiary,
    /// A4 - Subsidiary author
    AuthorSubsidiary,
    /// C1 - Custom 1, commonly the corporate author or affiliation
    Custom1,
    /// JF - Journal/Periodical name: full format
    JournalFull,
    /// JO - Journal/Periodical name: full format (alternative)
    JournalFullAlternative,
    /// JA - Journal/Periodical name: standard abbreviation
    JournalAbbreviation,
    /// T2 - Secondary title (journal or book title)
    SecondaryTitle,
    /// PY - Publication year
    PublicationYear,
    /// Y1 - Primary date
    DatePrimary,
    /// Y2 - Access date
    DateAccess,
    /// DA - Date
    Date,
    /// VL - Volume number
    Volume,
    /// IS - Issue number
    Issue,
    /// SP - Start page
    StartPage,
    /// EP - End page
    EndPage,
    /// DO - DOI
    Doi,
    /// M3 - Type of work, often holding the DOI in exports
    TypeOfWork,
    /// AB - Abstract
    Abstract,
    /// N2 - Abstract (alternative)
    AbstractAlternative,
    /// KW - Keywords
    Keywords,
    /// SN - ISSN/ISBN
    SerialNumber,
    /// UR - Web/URL
    Url,
    /// PB - Publisher
    Publisher,
    /// ER - End of reference
    EndOfReference,
    /// Unknown tag
    Unknown(CompactString),
}

impl RisTag {
    /// Convert a string tag to a RisTag enum.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TY" => RisTag::Type,
            "TI" => RisTag::Title,
            "T1" => RisTag::TitleAlternative,
            "AU" => RisTag::Author,
            "A1" => RisTag::AuthorPrimary,
            "A2" => RisTag::AuthorSecondary,
            "A3" => RisTag::AuthorTertiary,
            "A4" => RisTag::AuthorSubsidiary,
            "C1" => RisTag::Custom1,
            "JF" => RisTag::JournalFull,
            "JO" => RisTag::JournalFullAlternative,
            "JA" => RisTag::JournalAbbreviation,
            "T2" => RisTag::SecondaryTitle,
            "PY" => RisTag::PublicationYear,
            "Y1" => RisTag::DatePrimary,
            "Y2" => RisTag::DateAccess,
            "DA" => RisTag::Date,
            "VL" => RisTag::Volume,
            "IS" => RisTag::Issue,
            "SP" => RisTag::StartPage,
            "EP" => RisTag::EndPage,
            "DO" => RisTag::Doi,
            "M3" => RisTag::TypeOfWork,
            "AB" => RisTag::Abstract,
            "N2" => RisTag::AbstractAlternative,
            "KW" => RisTag::Keywords,
            "SN" => RisTag::SerialNumber,
            "UR" => RisTag::Url,
            "PB" => RisTag::Publisher,
            "ER" => RisTag::EndOfReference,
            _ => RisTag::Unknown(CompactString::from(tag)),
        }
    }

    /// Convert a RisTag enum back to its string representation.
    pub fn as_tag(&self) -> &str {
        match self {
            RisTag::Type => "TY",
            RisTag::Title => "TI",
            RisTag::TitleAlternative => "T1",
            RisTag::Author => "AU",
            RisTag::AuthorPrimary => "A1",
            RisTag::AuthorSecondary => "A2",
            RisTag::AuthorTertiary => "A3",
            RisTag::AuthorSubsidiary => "A4",
            RisTag::Custom1 => "C1",
            RisTag::JournalFull => "JF",
            RisTag::JournalFullAlternative => "JO",
            RisTag::JournalAbbreviation => "JA",
            RisTag::SecondaryTitle => "T2",
            RisTag::PublicationYear => "PY",
            RisTag::DatePrimary => "Y1",
            RisTag::DateAccess => "Y2",
            RisTag::Date => "DA",
            RisTag::Volume => "VL",
            RisTag::Issue => "IS",
            RisTag::StartPage => "SP",
            RisTag::EndPage => "EP",
            RisTag::Doi => "DO",
            RisTag::TypeOfWork => "M3",
            RisTag::Abstract => "AB",
            RisTag::AbstractAlternative => "N2",
            RisTag::Keywords => "KW",
            RisTag::SerialNumber => "SN",
            RisTag::Url => "UR",
            RisTag::Publisher => "PB",
            RisTag::EndOfReference => "ER",
            RisTag::Unknown(tag) => tag.as_str(),
        }
    }

    /// Whether continuation lines of this tag keep their line breaks.
    ///
    /// Abstracts and notes are joined with `\n`; everything else with a space.
    pub fn keeps_line_breaks(&self) -> bool {
        matches!(self, RisTag::Abstract | RisTag::AbstractAlternative)
    }

    /// Get the priority of this tag for journal name selection.
    /// Lower numbers have higher priority.
    ///
    /// Priority order:
    /// 1. JO (Journal Full Alternative)
    /// 2. JF (Journal Full)
    /// 3. JA (Journal Abbreviation)
    /// 4. T2 (Secondary Title)
    pub fn journal_priority(&self) -> Option<u8> {
        match self {
            RisTag::JournalFullAlternative => Some(1),
            RisTag::JournalFull => Some(2),
            RisTag::JournalAbbreviation => Some(3),
            RisTag::SecondaryTitle => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for RisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
