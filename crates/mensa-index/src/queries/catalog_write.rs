//! Ingestion-side writes: collection/document upserts and FTS rows.
//!
//! Ingestion itself is an external job; these helpers exist so that job
//! (and the test suites) can populate all three backends consistently.

use rusqlite::{params, Connection};
use serde_json::{Map, Value};

use mensa_core::errors::IndexError;
use mensa_core::models::{Collection, Document};

use super::{put_f64, put_str};
use crate::to_index_err;

/// Upsert a collection by its `(name, address)` unique key, returning
/// the row id.
pub fn upsert_collection(conn: &Connection, collection: &Collection) -> Result<i64, IndexError> {
    conn.execute(
        "INSERT INTO collections
            (name, address, city, state, latitude, longitude, cuisine,
             rating, review_count, delivery_fee, delivery_minimum)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(name, address) DO UPDATE SET
            city = excluded.city,
            state = excluded.state,
            latitude = excluded.latitude,
            longitude = excluded.longitude,
            cuisine = excluded.cuisine,
            rating = excluded.rating,
            review_count = excluded.review_count,
            delivery_fee = excluded.delivery_fee,
            delivery_minimum = excluded.delivery_minimum",
        params![
            collection.name,
            collection.address,
            collection.city,
            collection.state,
            collection.latitude,
            collection.longitude,
            collection.cuisine,
            collection.rating,
            collection.review_count,
            collection.delivery_fee,
            collection.delivery_minimum,
        ],
    )
    .map_err(|e| to_index_err(e.to_string()))?;

    conn.query_row(
        "SELECT id FROM collections WHERE name = ?1 AND address = ?2",
        params![collection.name, collection.address],
        |row| row.get(0),
    )
    .map_err(|e| to_index_err(e.to_string()))
}

/// Upsert a document by external_id under the given collection.
pub fn upsert_document(
    conn: &Connection,
    collection_id: i64,
    document: &Document,
) -> Result<(), IndexError> {
    conn.execute(
        "INSERT INTO documents
            (collection_id, external_id, category, name, description, price, text)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(external_id) DO UPDATE SET
            collection_id = excluded.collection_id,
            category = excluded.category,
            name = excluded.name,
            description = excluded.description,
            price = excluded.price,
            text = excluded.text",
        params![
            collection_id,
            document.external_id,
            document.category,
            document.name,
            document.description,
            document.price,
            document.text,
        ],
    )
    .map_err(|e| to_index_err(e.to_string()))?;
    Ok(())
}

/// Replace a document's keyword-index row. The stored metadata map is
/// the authoritative text-indexed metadata returned with keyword hits.
pub fn index_document_fts(
    conn: &Connection,
    collection: &Collection,
    document: &Document,
) -> Result<(), IndexError> {
    let metadata = document_metadata(collection, document);
    let metadata_json = Value::Object(metadata).to_string();

    conn.execute(
        "DELETE FROM documents_fts WHERE external_id = ?1",
        params![document.external_id],
    )
    .map_err(|e| to_index_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO documents_fts (external_id, text, collection, cuisine, category, metadata)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            document.external_id,
            document.text,
            collection.name,
            collection.cuisine.as_deref().unwrap_or(""),
            document.category,
            metadata_json,
        ],
    )
    .map_err(|e| to_index_err(e.to_string()))?;
    Ok(())
}

/// The flattened document + collection metadata map, as mirrored into
/// both the keyword index and the vector payload.
pub fn document_metadata(collection: &Collection, document: &Document) -> Map<String, Value> {
    let mut map = Map::new();
    put_str(&mut map, "name", Some(document.name.clone()));
    put_str(&mut map, "description", document.description.clone());
    put_str(&mut map, "category", Some(document.category.clone()));
    put_str(&mut map, "text", Some(document.text.clone()));
    put_f64(&mut map, "price", Some(document.price));
    put_str(&mut map, "collection", Some(collection.name.clone()));
    put_str(&mut map, "address", Some(collection.address.clone()));
    put_str(&mut map, "city", collection.city.clone());
    put_str(&mut map, "state", collection.state.clone());
    put_f64(&mut map, "latitude", collection.latitude);
    put_f64(&mut map, "longitude", collection.longitude);
    put_str(&mut map, "cuisine", collection.cuisine.clone());
    put_f64(&mut map, "rating", Some(collection.rating));
    put_f64(&mut map, "review_count", Some(collection.review_count as f64));
    put_f64(&mut map, "delivery_fee", Some(collection.delivery_fee));
    put_f64(
        &mut map,
        "delivery_minimum",
        Some(collection.delivery_minimum),
    );
    map
}
