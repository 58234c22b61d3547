use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::FileMetadata;

/// Key under which the last used spreadsheet's identity is cached.
const BINDING_KEY: &str = "spreadsheet_binding";

/// Remember which spreadsheet this session worked with. Overwrites any
/// previous entry.
pub fn store_binding_metadata(conn: &Connection, metadata: &FileMetadata) -> Result<()> {
    let value = serde_json::to_string(metadata).context("failed to encode file metadata")?;
    conn.execute(
        "INSERT INTO session (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![BINDING_KEY, value],
    )
    .context("failed to store file metadata")?;
    Ok(())
}

/// Read back the cached identity, if any. A corrupt entry is an error so the
/// caller can report that the previous file could not be restored.
pub fn fetch_binding_metadata(conn: &Connection) -> Result<Option<FileMetadata>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM session WHERE key = ?1",
            params![BINDING_KEY],
            |row| row.get(0),
        )
        .optional()
        .context("failed to read file metadata")?;

    value
        .map(|json| serde_json::from_str(&json).context("stored file metadata is corrupt"))
        .transpose()
}

pub fn clear_binding_metadata(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM session WHERE key = ?1", params![BINDING_KEY])
        .context("failed to clear file metadata")?;
    Ok(())
}
