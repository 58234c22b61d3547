use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-roster";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "session.sqlite";

/// Ensure the session database exists, run lazy migrations, and return a live
/// connection.
pub fn ensure_schema() -> Result<Connection> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir).context("failed to create data directory")?;

    let conn =
        Connection::open(dir.join(DB_FILE_NAME)).context("failed to open SQLite database")?;
    migrate(&conn)?;
    Ok(conn)
}

/// Create the tables the session store relies on. Split out so tests can run it
/// against an in-memory connection.
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS session (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create session table")?;
    Ok(())
}

/// Resolve the application data directory inside the user's home.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
