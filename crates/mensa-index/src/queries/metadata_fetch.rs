//! Batched metadata fetch: documents joined with their owning
//! collection, keyed by external_id, one round trip per request.

use rusqlite::Connection;
use serde_json::Map;

use mensa_core::errors::IndexError;
use mensa_core::traits::DocumentRecord;

use super::{put_f64, put_str};
use crate::to_index_err;

/// Fetch full rows for exactly the given external_ids. Ids with no row
/// are absent from the output; the caller degrades per-hit.
pub fn fetch_records(
    conn: &Connection,
    external_ids: &[String],
) -> Result<Vec<DocumentRecord>, IndexError> {
    if external_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; external_ids.len()].join(",");
    let sql = format!(
        "SELECT d.external_id, d.category, d.name, d.description, d.price,
                c.name, c.address, c.city, c.state, c.latitude, c.longitude,
                c.cuisine, c.rating, c.review_count, c.delivery_fee, c.delivery_minimum
         FROM documents d
         JOIN collections c ON d.collection_id = c.id
         WHERE d.external_id IN ({placeholders})"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_index_err(e.to_string()))?;

    let rows = stmt
        .query_map(rusqlite::params_from_iter(external_ids), |row| {
            let external_id: String = row.get(0)?;
            let mut fields = Map::new();

            put_str(&mut fields, "category", row.get::<_, Option<String>>(1)?);
            put_str(&mut fields, "name", row.get::<_, Option<String>>(2)?);
            put_str(
                &mut fields,
                "description",
                row.get::<_, Option<String>>(3)?,
            );
            put_f64(&mut fields, "price", row.get::<_, Option<f64>>(4)?);
            put_str(&mut fields, "collection", row.get::<_, Option<String>>(5)?);
            put_str(&mut fields, "address", row.get::<_, Option<String>>(6)?);
            put_str(&mut fields, "city", row.get::<_, Option<String>>(7)?);
            put_str(&mut fields, "state", row.get::<_, Option<String>>(8)?);
            put_f64(&mut fields, "latitude", row.get::<_, Option<f64>>(9)?);
            put_f64(&mut fields, "longitude", row.get::<_, Option<f64>>(10)?);
            put_str(&mut fields, "cuisine", row.get::<_, Option<String>>(11)?);
            put_f64(&mut fields, "rating", row.get::<_, Option<f64>>(12)?);
            put_f64(
                &mut fields,
                "review_count",
                row.get::<_, Option<f64>>(13)?,
            );
            put_f64(
                &mut fields,
                "delivery_fee",
                row.get::<_, Option<f64>>(14)?,
            );
            put_f64(
                &mut fields,
                "delivery_minimum",
                row.get::<_, Option<f64>>(15)?,
            );

            Ok(DocumentRecord {
                external_id,
                fields,
            })
        })
        .map_err(|e| to_index_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row.map_err(|e| to_index_err(e.to_string()))?);
    }
    Ok(records)
}
