//! Error type for the spreadsheet bridge.
//!
//! Every variant is recoverable: the UI turns it into a status message and
//! returns to a usable state.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The user backed out of the file prompt.
    #[error("File selection cancelled")]
    SelectionCancelled,

    /// The selected path could not be resolved or read.
    #[error("cannot use {path}: {source}")]
    Selection {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The selection is not an `.xlsx` file, or a directory holding none.
    #[error("no .xlsx spreadsheet at {path}")]
    NoSpreadsheet { path: PathBuf },

    /// Read-write access to the bound file was not granted.
    #[error("Need write permissions to save {name}")]
    PermissionDenied { name: String },

    /// The file could not be opened or parsed as a roster.
    #[error("failed to read {name}: {message}")]
    Load { name: String, message: String },

    /// Building or writing the workbook failed.
    #[error("failed to write {name}: {message}")]
    Save { name: String, message: String },

    /// None of the selected files matches the remembered binding.
    #[error("could not find {name} in the selection")]
    NotFound { name: String },
}

pub type Result<T> = std::result::Result<T, BridgeError>;

impl BridgeError {
    pub fn load(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Load {
            name: name.into(),
            message: message.to_string(),
        }
    }

    pub fn save(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Save {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Map a write failure, keeping permission problems distinct.
    pub fn from_write(name: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                name: name.to_string(),
            }
        } else {
            Self::save(name, err)
        }
    }

    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_write_is_kept_distinct() {
        let err = BridgeError::from_write(
            "roster.xlsx",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_permission_error());
        assert_eq!(err.to_string(), "Need write permissions to save roster.xlsx");
    }

    #[test]
    fn other_write_failures_carry_detail() {
        let err = BridgeError::from_write(
            "roster.xlsx",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert!(!err.is_permission_error());
        assert_eq!(err.to_string(), "failed to write roster.xlsx: disk full");
    }

    #[test]
    fn cancelled_selection_message() {
        let err = BridgeError::SelectionCancelled;
        assert!(!err.is_permission_error());
        assert_eq!(err.to_string(), "File selection cancelled");
    }

    #[test]
    fn no_spreadsheet_names_the_path() {
        let err = BridgeError::NoSpreadsheet {
            path: PathBuf::from("/home/me/students.xls"),
        };
        assert_eq!(err.to_string(), "no .xlsx spreadsheet at /home/me/students.xls");
    }
}
