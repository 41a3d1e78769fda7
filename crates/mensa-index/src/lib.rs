//! # mensa-index
//!
//! SQLite-backed collaborators for the search core: the relational
//! metadata store, the FTS5 keyword index, and the vector index with a
//! payload mirror. One `IndexEngine` owns the connection pool and
//! implements all three backend traits; each backend is still joined to
//! the others only by `external_id` equality.

pub mod engine;
pub mod pool;
pub mod queries;
pub mod schema;

pub use engine::IndexEngine;

use mensa_core::errors::IndexError;

/// Shorthand for wrapping rusqlite failures.
pub(crate) fn to_index_err(message: String) -> IndexError {
    IndexError::SqliteError { message }
}
