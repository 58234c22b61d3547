//! Ratatui front-end: a roster table, modal forms for add/edit, confirmation
//! dialogs, and a path prompt that stands in for a file picker.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::{App, Controls, StatusKind};
pub use terminal::run_app;
