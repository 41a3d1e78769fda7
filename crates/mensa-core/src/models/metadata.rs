//! Metadata numeric normalization.
//!
//! The relational store, the keyword index, and the vector payload each
//! have their own numeric typing (SQL INTEGER vs REAL, JSON numbers,
//! stringly-typed payloads). Every numeric field is normalized to f64
//! before comparison or serialization so the two retrieval sources
//! never disagree on type.

use serde_json::{Map, Value};

/// Metadata fields that must carry a single floating-point representation.
pub const NUMERIC_FIELDS: &[&str] = &[
    "latitude",
    "longitude",
    "price",
    "rating",
    "review_count",
    "delivery_fee",
    "delivery_minimum",
];

/// Coerce a JSON value to f64: numbers directly, numeric strings parsed.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Normalize all known numeric fields of a metadata map in place.
/// Uncoercible values are replaced with null rather than left with a
/// mismatched type.
pub fn normalize_numeric_fields(metadata: &mut Map<String, Value>) {
    for field in NUMERIC_FIELDS {
        if let Some(value) = metadata.get(*field) {
            if value.is_null() {
                continue;
            }
            let replacement = match coerce_f64(value) {
                Some(f) => serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                None => Value::Null,
            };
            metadata.insert((*field).to_string(), replacement);
        }
    }
}
