//! Query modules, one per backend concern.

pub mod catalog_write;
pub mod keyword_search;
pub mod metadata_fetch;
pub mod vector_search;

use serde_json::{Map, Value};

/// Insert an optional string field as a JSON string or null.
pub(crate) fn put_str(map: &mut Map<String, Value>, key: &str, value: Option<String>) {
    map.insert(
        key.to_string(),
        value.map(Value::String).unwrap_or(Value::Null),
    );
}

/// Insert an optional numeric field as a JSON f64 or null.
/// All numeric metadata carries one floating-point representation.
pub(crate) fn put_f64(map: &mut Map<String, Value>, key: &str, value: Option<f64>) {
    let json = value
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null);
    map.insert(key.to_string(), json);
}
