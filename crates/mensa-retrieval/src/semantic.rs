//! Vector search joined against the relational metadata store.
//!
//! The join key is `external_id`, and it is the only consistency
//! guarantee between the two backends. A vector hit with no relational
//! row degrades to its payload mirror; it is never dropped for a
//! missing row.

use std::collections::HashMap;
use std::sync::Arc;

use mensa_core::errors::MensaResult;
use mensa_core::models::metadata::normalize_numeric_fields;
use mensa_core::models::{Document, QueryFilters, SearchResult};
use mensa_core::traits::{IEmbeddingProvider, IMetadataStore, IVectorIndex};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::filters;

/// Vector-only search with inline structured filters (no rank fusion).
pub struct SemanticSearcher {
    embedder: Arc<dyn IEmbeddingProvider>,
    vector_index: Arc<dyn IVectorIndex>,
    metadata_store: Arc<dyn IMetadataStore>,
}

impl SemanticSearcher {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        vector_index: Arc<dyn IVectorIndex>,
        metadata_store: Arc<dyn IMetadataStore>,
    ) -> Self {
        Self {
            embedder,
            vector_index,
            metadata_store,
        }
    }

    /// Embed the query, fetch top_k nearest documents, enrich each hit
    /// with relational metadata in one batched round trip, and apply
    /// the structured filters inline.
    pub fn search(
        &self,
        query_text: &str,
        top_k: usize,
        query_filters: &QueryFilters,
    ) -> MensaResult<Vec<SearchResult>> {
        let embedding = self.embedder.embed(query_text)?;
        let hits = self.vector_index.query(&embedding, top_k)?;
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = hits.iter().map(|h| h.external_id.clone()).collect();
        // A metadata-store failure degrades every hit to its payload
        // mirror instead of failing the whole search.
        let records = match self.metadata_store.fetch(&ids) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "metadata fetch failed; degrading to vector payloads");
                Vec::new()
            }
        };
        let mut rows: HashMap<String, Map<String, Value>> = records
            .into_iter()
            .map(|r| (r.external_id, r.fields))
            .collect();

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let mut metadata = hit.payload;
            match rows.remove(&hit.external_id) {
                Some(fields) => {
                    // Relational fields take precedence; payload fills gaps.
                    for (key, value) in fields {
                        if value.is_null() && metadata.contains_key(&key) {
                            continue;
                        }
                        metadata.insert(key, value);
                    }
                }
                None => {
                    debug!(
                        external_id = %hit.external_id,
                        "no relational row for vector hit; using payload metadata"
                    );
                }
            }

            if metadata.is_empty() {
                // Nothing from either source: unusable.
                warn!(external_id = %hit.external_id, "dropping hit with no metadata from either source");
                continue;
            }

            ensure_text_field(&mut metadata);
            normalize_numeric_fields(&mut metadata);

            results.push(SearchResult {
                id: hit.external_id,
                score: hit.score,
                metadata,
            });
        }

        Ok(filters::apply_filters(results, query_filters))
    }
}

/// Guarantee a `text` field for downstream dietary filtering and LLM
/// prompts, deriving it from name + description when absent.
fn ensure_text_field(metadata: &mut Map<String, Value>) {
    let has_text = metadata
        .get("text")
        .and_then(Value::as_str)
        .is_some_and(|t| !t.is_empty());
    if has_text {
        return;
    }
    let name = metadata.get("name").and_then(Value::as_str).unwrap_or("");
    let description = metadata.get("description").and_then(Value::as_str);
    metadata.insert(
        "text".to_string(),
        Value::String(Document::derived_text(name, description)),
    );
}
