//! # mensa-core
//!
//! Foundation crate for the mensa hybrid search core.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{LlmClientConfig, MensaConfig, SearchConfig};
pub use errors::{MensaError, MensaResult};
pub use models::{ParsedQuery, QueryFilters, RankedResult, SearchResult};
