//! Session persistence: a small key-value table inside an embedded SQLite file.

mod connection;
mod session;

pub use connection::{data_dir, ensure_schema, migrate};
pub use session::{clear_binding_metadata, fetch_binding_metadata, store_binding_metadata};
