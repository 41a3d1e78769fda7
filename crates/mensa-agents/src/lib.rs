//! # mensa-agents
//!
//! The LLM-backed half of the search core: query interpretation,
//! quality and compliance gates, relevance ranking, and the
//! coordinator that sequences them with a deterministic fused-path
//! fallback. The `SearchService` entry point is what a surrounding
//! transport layer consumes.

pub mod coordinator;
pub mod gates;
pub mod interpreter;
pub mod llm;
pub mod ranker;
pub mod service;

pub use coordinator::{PipelineCoordinator, PipelineStage};
pub use gates::{ComplianceGate, QualityGate};
pub use interpreter::QueryInterpreter;
pub use llm::ChatCompletionsClient;
pub use ranker::RelevanceRanker;
pub use service::SearchService;
