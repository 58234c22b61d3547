//! Domain models shared by the roster, the spreadsheet bridge, and the TUI.
//! These stay plain data holders; validation lives in `roster` and file
//! handling lives in `bridge`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the roster. Records carry no identifier: their position in the
/// roster is their identity, so edit and delete flows address them by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl StudentRecord {
    pub fn new(first_name: &str, last_name: &str, phone: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }

    /// Copy of the record with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.phone.trim(),
            self.email.trim(),
        )
    }

    /// `First Last`, used by confirmation prompts and status messages.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// Identity of a previously used spreadsheet, cached in the session store so
/// the next startup can try to find the same file again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// File name without its directory.
    pub name: String,
    /// Opaque identifier; compared for equality only.
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub last_modified: i64,
}

/// Render a ten digit phone number as `(555) 123-4567`. Anything that does not
/// reduce to exactly ten digits is returned untouched.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return phone.to_string();
    }
    format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}
