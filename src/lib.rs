//! Core library surface for the Student Roster TUI.
//!
//! A session keeps an ordered roster in memory, mirrors it to and from a
//! spreadsheet on disk, and remembers which spreadsheet it used so the next
//! session can pick it up again.
pub mod bridge;
pub mod cli;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod roster;
pub mod ui;

/// Session store bootstrap used by `main.rs`.
pub use db::{data_dir, ensure_schema};

pub use error::BridgeError;
pub use models::{format_phone, FileMetadata, StudentRecord};
pub use roster::{RosterError, RosterStore, ValidationError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
