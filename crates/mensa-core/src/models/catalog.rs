use serde::{Deserialize, Serialize};

/// An owning collection (a restaurant). Owns 0..N documents.
/// Created by ingestion; read-only to the search core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cuisine: Option<String>,
    pub rating: f64,
    pub review_count: i64,
    pub delivery_fee: f64,
    pub delivery_minimum: f64,
}

/// The indexed unit (a menu entry).
///
/// `external_id` is the stable composite key (`<collection>_<category>_<item>`)
/// and the sole join key between the vector backend, the keyword backend,
/// and the relational store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub external_id: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    /// Text blob used for embedding and keyword indexing.
    pub text: String,
}

impl Document {
    /// Derive the text blob from name + description when ingestion did
    /// not supply one.
    pub fn derived_text(name: &str, description: Option<&str>) -> String {
        match description {
            Some(d) if !d.is_empty() => format!("{name} {d}"),
            _ => name.to_string(),
        }
    }
}
