//! IndexEngine — owns the ConnectionPool and implements the three
//! backend traits consumed by the retrieval layer.

use std::path::Path;

use mensa_core::config::IndexConfig;
use mensa_core::errors::IndexError;
use mensa_core::models::{Collection, Document};
use mensa_core::traits::{
    DocumentRecord, IEmbeddingProvider, IKeywordIndex, IMetadataStore, IVectorIndex, KeywordHit,
    VectorHit,
};
use tracing::{debug, info};

use crate::pool::ConnectionPool;
use crate::queries::{catalog_write, keyword_search, metadata_fetch, vector_search};
use crate::schema;

/// The index engine. Owns the connection pool and provides the
/// vector, keyword, and metadata backend interfaces.
pub struct IndexEngine {
    pool: ConnectionPool,
    /// When true, reads go through the read pool (file-backed mode).
    /// In-memory read pool connections are isolated databases, so
    /// in-memory mode routes all reads through the writer.
    use_read_pool: bool,
}

impl IndexEngine {
    /// Open an engine backed by a file on disk.
    pub fn open(path: &Path, config: &IndexConfig) -> Result<Self, IndexError> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        info!(path = %path.display(), readers = engine.pool.readers.size(), "index engine opened");
        Ok(engine)
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> Result<Self, IndexError> {
        let config = IndexConfig::default();
        let pool = ConnectionPool::open_in_memory(config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> Result<(), IndexError> {
        self.pool.writer.with_conn(schema::create_schema)
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> Result<T, IndexError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, IndexError>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }

    /// Index one document into all three backends: relational row,
    /// keyword row, and embedding + payload mirror.
    pub fn index_document(
        &self,
        collection: &Collection,
        document: &Document,
        embedder: &dyn IEmbeddingProvider,
    ) -> Result<(), IndexError> {
        let embedding = embedder
            .embed(&document.text)
            .map_err(|e| IndexError::BackendUnavailable {
                backend: "embedding".to_string(),
                reason: e.to_string(),
            })?;
        let payload = catalog_write::document_metadata(collection, document);

        self.pool.writer.with_conn(|conn| {
            let collection_id = catalog_write::upsert_collection(conn, collection)?;
            catalog_write::upsert_document(conn, collection_id, document)?;
            catalog_write::index_document_fts(conn, collection, document)?;
            vector_search::store_vector(conn, &document.external_id, &embedding, &payload)?;
            Ok(())
        })?;

        debug!(external_id = %document.external_id, "document indexed");
        Ok(())
    }

    /// Store a vector + payload without a relational row. Exists for
    /// tests exercising the degraded-join path and for partial ingestion.
    pub fn store_vector_only(
        &self,
        external_id: &str,
        embedding: &[f32],
        payload: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), IndexError> {
        self.pool
            .writer
            .with_conn(|conn| vector_search::store_vector(conn, external_id, embedding, payload))
    }
}

impl IVectorIndex for IndexEngine {
    fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<VectorHit>, IndexError> {
        self.with_reader(|conn| vector_search::search_vector(conn, embedding, top_k))
    }
}

impl IKeywordIndex for IndexEngine {
    fn query(&self, terms: &str, top_k: usize) -> Result<Vec<KeywordHit>, IndexError> {
        self.with_reader(|conn| keyword_search::search_keyword(conn, terms, top_k))
    }
}

impl IMetadataStore for IndexEngine {
    fn fetch(&self, external_ids: &[String]) -> Result<Vec<DocumentRecord>, IndexError> {
        self.with_reader(|conn| metadata_fetch::fetch_records(conn, external_ids))
    }
}
