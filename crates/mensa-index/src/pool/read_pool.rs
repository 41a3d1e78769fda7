//! Pool of 2–10 read connections (concurrent, never blocked by the
//! writer via WAL). Acquisition is scoped to a closure so a cancelled
//! request always releases its connection.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rusqlite::Connection;

use mensa_core::errors::IndexError;

use super::pragmas::apply_read_pragmas;
use crate::to_index_err;

/// Minimum number of read connections.
const MIN_POOL_SIZE: usize = 2;

/// Maximum number of read connections.
const MAX_POOL_SIZE: usize = 10;

/// A pool of read-only SQLite connections.
pub struct ReadPool {
    connections: Vec<std::sync::Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    /// Open a pool of read connections to the given database path.
    pub fn open(
        path: &Path,
        pool_size: usize,
        busy_timeout_ms: u64,
    ) -> Result<Self, IndexError> {
        let size = pool_size.clamp(MIN_POOL_SIZE, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_index_err(e.to_string()))?;
            apply_read_pragmas(&conn, busy_timeout_ms)?;
            connections.push(std::sync::Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Create an in-memory pool (for testing).
    pub fn open_in_memory(
        pool_size: usize,
        busy_timeout_ms: u64,
    ) -> Result<Self, IndexError> {
        let size = pool_size.clamp(MIN_POOL_SIZE, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_in_memory().map_err(|e| to_index_err(e.to_string()))?;
            apply_read_pragmas(&conn, busy_timeout_ms)?;
            connections.push(std::sync::Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Execute a closure with a read connection from the pool
    /// (round-robin). The connection is released when the closure
    /// returns, including on early `?` exits.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, IndexError>
    where
        F: FnOnce(&Connection) -> Result<T, IndexError>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx]
            .lock()
            .map_err(|e| to_index_err(format!("read pool lock poisoned: {e}")))?;
        f(&guard)
    }

    /// Number of connections in the pool.
    pub fn size(&self) -> usize {
        self.connections.len()
    }
}
