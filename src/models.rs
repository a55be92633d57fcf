//! Domain models shared by the store and the TUI. These stay light-weight
//! data holders so other layers can focus on persistence and presentation.

use std::fmt;

/// In-memory handle for a record. Ids are handed out by the store in
/// insertion order and never written to disk, so they only identify a record
/// for the lifetime of one loaded directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One name/phone-number pair from the directory.
pub struct Record {
    /// Identity used by edit/delete flows to find the record again.
    pub id: RecordId,
    /// Display name. Duplicates are allowed.
    pub name: String,
    /// Phone number kept as raw text; the file format does not constrain it.
    pub phone_number: String,
}

impl Record {
    /// Whether `query` names this record, ignoring case. Characters are
    /// compared one by one, so each pair matches if they are equal in upper
    /// or in lower case (`ı` matches `I`, `ß` does not match `SS`).
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.chars().count() == query.chars().count()
            && self
                .name
                .chars()
                .zip(query.chars())
                .all(|(a, b)| chars_match_ignoring_case(a, b))
    }

    /// `Name: ... / Phone Number: ...` summary used in result listings.
    pub fn summary(&self) -> String {
        format!("Name: {}  Phone Number: {}", self.name, self.phone_number)
    }
}

fn chars_match_ignoring_case(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase()) || a.to_lowercase().eq(b.to_lowercase())
}

impl fmt::Display for Record {
    /// Same `name, phone` shape the directory file uses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.phone_number)
    }
}
