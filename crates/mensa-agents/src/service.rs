//! The core-exposed search entry point, consumed by whatever transport
//! layer sits above (out of scope here).

use mensa_core::config::SearchConfig;
use mensa_core::errors::MensaResult;
use mensa_core::models::{QueryFilters, RankedResult};
use mensa_core::traits::ILlmClient;
use tracing::info;

use crate::coordinator::PipelineCoordinator;

pub struct SearchService<L: ILlmClient> {
    coordinator: PipelineCoordinator<L>,
    default_top_k: usize,
}

impl<L: ILlmClient> SearchService<L> {
    pub fn new(coordinator: PipelineCoordinator<L>, config: &SearchConfig) -> Self {
        Self {
            coordinator,
            default_top_k: config.default_top_k,
        }
    }

    /// Answer one query. Always returns a best-effort ranked list;
    /// the only surfaced error is total backend unavailability, which
    /// is distinct from an empty result set.
    pub async fn handle_search(
        &self,
        query: &str,
        top_k: Option<usize>,
        filters: Option<QueryFilters>,
    ) -> MensaResult<Vec<RankedResult>> {
        let top_k = top_k.unwrap_or(self.default_top_k);
        let filters = filters.unwrap_or_default();
        info!(query, top_k, "handling search request");
        self.coordinator.run(query, top_k, &filters).await
    }
}
