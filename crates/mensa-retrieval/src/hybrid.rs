//! The fused retrieval path: over-fetch from both backends, merge with
//! RRF, then filter and truncate.
//!
//! One backend failing is a degraded search, not an error; both
//! failing is.

use std::sync::Arc;

use mensa_core::config::SearchConfig;
use mensa_core::errors::{IndexError, MensaResult};
use mensa_core::models::{QueryFilters, SearchResult};
use mensa_core::traits::{IKeywordIndex, VectorHit};
use tracing::{debug, warn};

use crate::filters;
use crate::fusion::RankFusionEngine;
use crate::semantic::SemanticSearcher;

pub struct HybridSearcher {
    semantic: SemanticSearcher,
    keyword_index: Arc<dyn IKeywordIndex>,
    fusion: RankFusionEngine,
    fetch_multiplier: usize,
}

impl HybridSearcher {
    pub fn new(
        semantic: SemanticSearcher,
        keyword_index: Arc<dyn IKeywordIndex>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            semantic,
            keyword_index,
            fusion: RankFusionEngine::new(config.rrf_k),
            fetch_multiplier: config.fetch_multiplier.max(1),
        }
    }

    /// Run both backends with an over-fetched limit, fuse by RRF, apply
    /// the structured filters post-merge, and truncate to top_k.
    ///
    /// Filters run after fusion here (not inline per source) so a result
    /// that would be filtered out never displaces one that survives.
    pub fn search(
        &self,
        query_text: &str,
        top_k: usize,
        query_filters: &QueryFilters,
    ) -> MensaResult<Vec<SearchResult>> {
        let fetch_limit = top_k.saturating_mul(self.fetch_multiplier);

        // Filters are withheld from the semantic leg: they apply once,
        // post-fusion.
        let vector_leg = self
            .semantic
            .search(query_text, fetch_limit, &QueryFilters::default());
        let keyword_leg = self.keyword_index.query(query_text, fetch_limit);

        let (vector_hits, keyword_hits) = match (vector_leg, keyword_leg) {
            (Ok(v), Ok(k)) => (results_to_vector_hits(v), k),
            (Ok(v), Err(e)) => {
                warn!(error = %e, "keyword backend failed; fusing vector results only");
                (results_to_vector_hits(v), Vec::new())
            }
            (Err(e), Ok(k)) => {
                warn!(error = %e, "vector backend failed; fusing keyword results only");
                (Vec::new(), k)
            }
            (Err(vector_err), Err(keyword_err)) => {
                return Err(IndexError::AllBackendsUnavailable {
                    vector: vector_err.to_string(),
                    keyword: keyword_err.to_string(),
                }
                .into());
            }
        };

        debug!(
            vector_hits = vector_hits.len(),
            keyword_hits = keyword_hits.len(),
            "fusing backend results"
        );

        let fused = self.fusion.fuse(vector_hits, keyword_hits);
        let mut filtered = filters::apply_filters(fused, query_filters);
        filtered.truncate(top_k);
        Ok(filtered)
    }
}

/// The semantic leg already joined relational metadata over the vector
/// payloads; reuse those enriched rows as the fusion input.
fn results_to_vector_hits(results: Vec<SearchResult>) -> Vec<VectorHit> {
    results
        .into_iter()
        .map(|r| VectorHit {
            external_id: r.id,
            score: r.score,
            payload: r.metadata,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensa_core::errors::MensaError;
    use mensa_core::traits::{
        DocumentRecord, IEmbeddingProvider, IMetadataStore, IVectorIndex, KeywordHit,
    };
    use serde_json::json;
    use std::sync::Arc;

    struct FixedEmbedder;
    impl IEmbeddingProvider for FixedEmbedder {
        fn embed(&self, _text: &str) -> MensaResult<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FixedVectors(Vec<VectorHit>);
    impl IVectorIndex for FixedVectors {
        fn query(&self, _embedding: &[f32], _top_k: usize) -> Result<Vec<VectorHit>, IndexError> {
            Ok(self.0.clone())
        }
    }

    struct FailingVectors;
    impl IVectorIndex for FailingVectors {
        fn query(&self, _embedding: &[f32], _top_k: usize) -> Result<Vec<VectorHit>, IndexError> {
            Err(IndexError::BackendUnavailable {
                backend: "vector".into(),
                reason: "down".into(),
            })
        }
    }

    struct EmptyStore;
    impl IMetadataStore for EmptyStore {
        fn fetch(&self, _ids: &[String]) -> Result<Vec<DocumentRecord>, IndexError> {
            Ok(Vec::new())
        }
    }

    struct FixedKeywords(Vec<KeywordHit>);
    impl IKeywordIndex for FixedKeywords {
        fn query(&self, _terms: &str, _top_k: usize) -> Result<Vec<KeywordHit>, IndexError> {
            Ok(self.0.clone())
        }
    }

    struct FailingKeywords;
    impl IKeywordIndex for FailingKeywords {
        fn query(&self, _terms: &str, _top_k: usize) -> Result<Vec<KeywordHit>, IndexError> {
            Err(IndexError::BackendUnavailable {
                backend: "keyword".into(),
                reason: "down".into(),
            })
        }
    }

    fn vhit(id: &str, score: f64, payload: serde_json::Value) -> VectorHit {
        VectorHit {
            external_id: id.into(),
            score,
            payload: payload.as_object().cloned().unwrap(),
        }
    }

    fn khit(id: &str, score: f64, metadata: serde_json::Value) -> KeywordHit {
        KeywordHit {
            external_id: id.into(),
            score,
            metadata: metadata.as_object().cloned().unwrap(),
        }
    }

    fn semantic(vectors: Arc<dyn IVectorIndex>) -> SemanticSearcher {
        SemanticSearcher::new(Arc::new(FixedEmbedder), vectors, Arc::new(EmptyStore))
    }

    #[test]
    fn fuses_both_sources_and_truncates() {
        let searcher = HybridSearcher::new(
            semantic(Arc::new(FixedVectors(vec![
                vhit("A", 0.9, json!({"name": "A"})),
                vhit("B", 0.8, json!({"name": "B"})),
            ]))),
            Arc::new(FixedKeywords(vec![
                khit("B", 7.0, json!({"name": "B"})),
                khit("C", 5.0, json!({"name": "C"})),
            ])),
            &SearchConfig::default(),
        );
        let results = searcher.search("taco", 2, &QueryFilters::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "B");
        assert_eq!(results[1].id, "A");
    }

    #[test]
    fn keyword_failure_degrades_to_vector_only() {
        let searcher = HybridSearcher::new(
            semantic(Arc::new(FixedVectors(vec![vhit(
                "A",
                0.9,
                json!({"name": "A"}),
            )]))),
            Arc::new(FailingKeywords),
            &SearchConfig::default(),
        );
        let results = searcher.search("taco", 5, &QueryFilters::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "A");
        assert!((results[0].score - 1.0 / 61.0).abs() < 1e-9);
    }

    #[test]
    fn vector_failure_degrades_to_keyword_only() {
        let searcher = HybridSearcher::new(
            semantic(Arc::new(FailingVectors)),
            Arc::new(FixedKeywords(vec![khit("C", 5.0, json!({"name": "C"}))])),
            &SearchConfig::default(),
        );
        let results = searcher.search("taco", 5, &QueryFilters::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "C");
    }

    #[test]
    fn both_backends_down_is_an_error() {
        let searcher = HybridSearcher::new(
            semantic(Arc::new(FailingVectors)),
            Arc::new(FailingKeywords),
            &SearchConfig::default(),
        );
        let err = searcher
            .search("taco", 5, &QueryFilters::default())
            .unwrap_err();
        assert!(matches!(
            err,
            MensaError::Index(IndexError::AllBackendsUnavailable { .. })
        ));
    }

    #[test]
    fn filters_apply_after_fusion() {
        // "pricey" outranks "cheap" in fusion, but the price filter
        // removes it without costing "cheap" its slot at top_k=1.
        let searcher = HybridSearcher::new(
            semantic(Arc::new(FixedVectors(vec![
                vhit("pricey", 0.9, json!({"name": "pricey", "price": 40.0})),
                vhit("cheap", 0.8, json!({"name": "cheap", "price": 8.0})),
            ]))),
            Arc::new(FixedKeywords(vec![khit(
                "pricey",
                7.0,
                json!({"name": "pricey", "price": 40.0}),
            )])),
            &SearchConfig::default(),
        );
        let filters = QueryFilters {
            price_max: Some(10.0),
            ..Default::default()
        };
        let results = searcher.search("taco", 1, &filters).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "cheap");
    }

    #[test]
    fn empty_catalog_yields_empty_results() {
        let searcher = HybridSearcher::new(
            semantic(Arc::new(FixedVectors(Vec::new()))),
            Arc::new(FixedKeywords(Vec::new())),
            &SearchConfig::default(),
        );
        let results = searcher.search("taco", 5, &QueryFilters::default()).unwrap();
        assert!(results.is_empty());
    }
}
