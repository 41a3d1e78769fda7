//! LLM relevance scoring, 0 to 10 per candidate.
//!
//! A single unscoreable response falls back to `raw_score * 10` for
//! that candidate only; one bad response never aborts the batch.
//! Transport errors are stage failures and escalate.

use std::sync::Arc;

use mensa_core::constants::{LLM_TEMPERATURE, MAX_RELEVANCE_SCORE};
use mensa_core::errors::AgentError;
use mensa_core::models::{RankedResult, SearchResult};
use mensa_core::traits::ILlmClient;
use tracing::debug;

pub struct RelevanceRanker<L: ILlmClient> {
    llm: Arc<L>,
}

impl<L: ILlmClient> RelevanceRanker<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }

    /// Score every result against the original query and sort by
    /// relevance descending. Equal scores keep input order.
    pub async fn rank(
        &self,
        results: Vec<SearchResult>,
        original_query: &str,
    ) -> Result<Vec<RankedResult>, AgentError> {
        let mut ranked = Vec::with_capacity(results.len());
        for result in results {
            let prompt = build_prompt(&result, original_query);
            let response = self
                .llm
                .complete(&prompt, LLM_TEMPERATURE)
                .await
                .map_err(|e| AgentError::stage("rank", e))?;

            let relevance_score = match parse_score(&response) {
                Some(score) => score,
                None => {
                    debug!(id = %result.id, "unscoreable ranking response; scaling raw score");
                    result.score * MAX_RELEVANCE_SCORE
                }
            };
            ranked.push(RankedResult {
                id: result.id,
                score: result.score,
                metadata: result.metadata,
                relevance_score,
            });
        }

        ranked.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(ranked)
    }
}

fn build_prompt(result: &SearchResult, original_query: &str) -> String {
    format!(
        "Evaluate the relevance of this menu item to the query \"{original_query}\".\n\
         Menu item: {}\n\
         Price: ${}\n\
         Restaurant: {}\n\
         \n\
         Rate relevance from 0 to 10 (10 being perfect match). Return only the number.",
        result.meta_str("text"),
        result.meta_str("price"),
        result.meta_str("collection"),
    )
}

/// Accept a bare number, clamped to the 0..=10 scale. Anything else is
/// a per-candidate parse failure.
fn parse_score(response: &str) -> Option<f64> {
    response
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite())
        .map(|s| s.clamp(0.0, MAX_RELEVANCE_SCORE))
}
