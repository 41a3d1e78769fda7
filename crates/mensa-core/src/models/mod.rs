//! Domain models shared across the workspace.

pub mod catalog;
pub mod metadata;
pub mod query;
pub mod result;

pub use catalog::{Collection, Document};
pub use query::{ParsedQuery, QueryFilters};
pub use result::{RankedResult, SearchResult};
