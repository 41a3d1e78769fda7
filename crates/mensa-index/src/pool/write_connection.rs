//! The single write connection. All mutations are serialized through it.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use mensa_core::errors::IndexError;

use super::pragmas::apply_pragmas;
use crate::to_index_err;

/// Exclusive writer. Wrapped in a mutex so the engine stays `Sync`.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path, busy_timeout_ms: u64) -> Result<Self, IndexError> {
        let conn = Connection::open(path).map_err(|e| to_index_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory(busy_timeout_ms: u64) -> Result<Self, IndexError> {
        let conn = Connection::open_in_memory().map_err(|e| to_index_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with the write connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, IndexError>
    where
        F: FnOnce(&Connection) -> Result<T, IndexError>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_index_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
