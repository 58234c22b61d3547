//! In-memory roster and the validation rules every committed record passes.

mod store;
mod validation;

pub use store::{RosterError, RosterStore};
pub use validation::{validate, ValidationError};
