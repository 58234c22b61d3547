//! Moves the roster between memory and a spreadsheet on disk.
//!
//! `binding` resolves and tracks the external file, `workbook` encodes and
//! decodes the single "Students" sheet.

mod binding;
mod workbook;

pub use binding::{candidates_from_selection, rebind, Access, FileBinding};
pub use workbook::{load, save, HEADERS, SHEET_NAME};
