//! Sequential agent pipeline with a single fallback transition.
//!
//! Stages run strictly in order; any stage failure abandons the
//! remaining stages and reruns the request through the fused
//! RankFusionEngine path. No partial agent output survives a fallback,
//! and there is no retry inside the pipeline.

use std::sync::Arc;

use mensa_core::errors::{AgentError, MensaResult};
use mensa_core::models::{QueryFilters, RankedResult};
use mensa_core::traits::ILlmClient;
use mensa_retrieval::{HybridSearcher, SemanticSearcher};
use tracing::{debug, info, warn};

use crate::gates::{ComplianceGate, QualityGate};
use crate::interpreter::QueryInterpreter;
use crate::ranker::RelevanceRanker;

/// Pipeline states. `Fallback` is reachable from every stage before
/// `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Parse,
    Search,
    Quality,
    Compliance,
    Rank,
    Done,
    Fallback,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Search => "search",
            Self::Quality => "quality",
            Self::Compliance => "compliance",
            Self::Rank => "rank",
            Self::Done => "done",
            Self::Fallback => "fallback",
        }
    }
}

pub struct PipelineCoordinator<L: ILlmClient> {
    llm: Arc<L>,
    interpreter: QueryInterpreter<L>,
    quality: QualityGate<L>,
    compliance: ComplianceGate<L>,
    ranker: RelevanceRanker<L>,
    searcher: SemanticSearcher,
    fused: HybridSearcher,
}

impl<L: ILlmClient> PipelineCoordinator<L> {
    /// Wire the pipeline from its injected collaborators. The LLM client
    /// is shared by every agent-backed stage; the fused searcher is the
    /// fallback path.
    pub fn new(llm: Arc<L>, searcher: SemanticSearcher, fused: HybridSearcher) -> Self {
        Self {
            interpreter: QueryInterpreter::new(Arc::clone(&llm)),
            quality: QualityGate::new(Arc::clone(&llm)),
            compliance: ComplianceGate::new(Arc::clone(&llm)),
            ranker: RelevanceRanker::new(Arc::clone(&llm)),
            llm,
            searcher,
            fused,
        }
    }

    /// Run the full pipeline for one request. Either every agent stage
    /// completes, or the whole request is answered by the fused path.
    pub async fn run(
        &self,
        raw_query: &str,
        top_k: usize,
        caller_filters: &QueryFilters,
    ) -> MensaResult<Vec<RankedResult>> {
        if !self.llm.is_available() {
            info!("no LLM credential configured; taking the fused path");
            return self.fallback(raw_query, top_k, caller_filters);
        }

        match self.run_stages(raw_query, top_k, caller_filters).await {
            Ok(ranked) => {
                debug!(stage = PipelineStage::Done.as_str(), results = ranked.len(), "pipeline complete");
                Ok(ranked)
            }
            Err(e) => {
                warn!(error = %e, "agent stage failed; taking the fused path");
                self.fallback(raw_query, top_k, caller_filters)
            }
        }
    }

    async fn run_stages(
        &self,
        raw_query: &str,
        top_k: usize,
        caller_filters: &QueryFilters,
    ) -> Result<Vec<RankedResult>, AgentError> {
        debug!(stage = PipelineStage::Parse.as_str(), query = raw_query);
        let parsed = self.interpreter.parse(raw_query).await;

        // Caller-supplied filters win over parsed ones field by field.
        let filters = QueryFilters::merged(caller_filters, &parsed.filters());

        debug!(stage = PipelineStage::Search.as_str(), keywords = ?parsed.keywords);
        let results = self
            .searcher
            .search(&parsed.keyword_text(), top_k, &filters)
            .map_err(|e| AgentError::stage(PipelineStage::Search.as_str(), e))?;

        debug!(stage = PipelineStage::Quality.as_str(), candidates = results.len());
        let results = self.quality.filter(results, raw_query).await?;

        debug!(stage = PipelineStage::Compliance.as_str(), candidates = results.len());
        let results = self.compliance.filter(results, raw_query).await?;

        debug!(stage = PipelineStage::Rank.as_str(), candidates = results.len());
        self.ranker.rank(results, raw_query).await
    }

    /// The fused RankFusionEngine path, run on the original raw query.
    /// Fused results carry a scaled relevance score so the output shape
    /// matches the agent path.
    fn fallback(
        &self,
        raw_query: &str,
        top_k: usize,
        caller_filters: &QueryFilters,
    ) -> MensaResult<Vec<RankedResult>> {
        debug!(stage = PipelineStage::Fallback.as_str(), query = raw_query);
        let fused = self.fused.search(raw_query, top_k, caller_filters)?;
        Ok(fused.into_iter().map(RankedResult::from_fused).collect())
    }
}
