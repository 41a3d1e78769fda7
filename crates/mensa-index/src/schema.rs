//! Schema creation for the three backends.
//!
//! `collections`/`documents` form the relational metadata store;
//! `documents_fts` is the keyword backend (FTS5, BM25 ranking);
//! `document_vectors` is the vector backend with a JSON payload mirror
//! of the metadata fields for the degraded-join fallback.

use rusqlite::Connection;

use mensa_core::errors::IndexError;

use crate::to_index_err;

/// Create all tables and indexes if they don't exist.
pub fn create_schema(conn: &Connection) -> Result<(), IndexError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS collections (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            city TEXT,
            state TEXT,
            latitude REAL,
            longitude REAL,
            cuisine TEXT,
            rating REAL NOT NULL DEFAULT 0,
            review_count INTEGER NOT NULL DEFAULT 0,
            delivery_fee REAL NOT NULL DEFAULT 0,
            delivery_minimum REAL NOT NULL DEFAULT 0
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_collections_name_address
            ON collections(name, address);

        CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY,
            collection_id INTEGER NOT NULL REFERENCES collections(id),
            external_id TEXT NOT NULL UNIQUE,
            category TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            price REAL NOT NULL,
            text TEXT NOT NULL
        );

        CREATE VIRTUAL TABLE IF NOT EXISTS documents_fts USING fts5(
            external_id UNINDEXED,
            text,
            collection,
            cuisine,
            category,
            metadata UNINDEXED
        );

        CREATE TABLE IF NOT EXISTS document_vectors (
            external_id TEXT PRIMARY KEY,
            embedding BLOB NOT NULL,
            dimensions INTEGER NOT NULL,
            payload TEXT NOT NULL DEFAULT '{}'
        );
        ",
    )
    .map_err(|e| to_index_err(e.to_string()))?;
    Ok(())
}
