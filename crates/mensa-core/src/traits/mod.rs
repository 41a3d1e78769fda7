//! Capability traits at the seams between the core and its collaborators.

mod embedding;
mod index;
mod llm;

pub use embedding::IEmbeddingProvider;
pub use index::{DocumentRecord, IKeywordIndex, IMetadataStore, IVectorIndex, KeywordHit, VectorHit};
pub use llm::ILlmClient;
