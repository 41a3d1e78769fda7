//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 64MB cache, configurable busy_timeout,
//! foreign_keys ON.

use rusqlite::Connection;

use mensa_core::errors::IndexError;

use crate::to_index_err;

/// Apply performance and safety pragmas to a writable connection.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u64) -> Result<(), IndexError> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        ",
    ))
    .map_err(|e| to_index_err(e.to_string()))?;
    Ok(())
}

/// Apply pragmas appropriate for read-only connections.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u64) -> Result<(), IndexError> {
    conn.execute_batch(&format!(
        "
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA cache_size = -16000;
        ",
    ))
    .map_err(|e| to_index_err(e.to_string()))?;
    Ok(())
}
