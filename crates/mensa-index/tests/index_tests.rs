//! Integration tests for the index engine: schema, ingestion, and the
//! three backend query paths.

use mensa_core::models::{Collection, Document};
use mensa_core::traits::{IKeywordIndex, IMetadataStore, IVectorIndex};
use mensa_embeddings::EmbeddingEngine;
use mensa_index::IndexEngine;
use serde_json::json;

fn taqueria() -> Collection {
    Collection {
        name: "La Taqueria".into(),
        address: "123 Mission St".into(),
        city: Some("San Francisco".into()),
        state: Some("CA".into()),
        latitude: Some(37.75),
        longitude: Some(-122.42),
        cuisine: Some("mexican".into()),
        rating: 4.6,
        review_count: 812,
        delivery_fee: 3.5,
        delivery_minimum: 15.0,
    }
}

fn doc(external_id: &str, name: &str, description: &str, price: f64) -> Document {
    Document {
        external_id: external_id.into(),
        name: name.into(),
        category: "tacos".into(),
        description: Some(description.into()),
        price,
        text: Document::derived_text(name, Some(description)),
    }
}

fn seeded_engine() -> (IndexEngine, EmbeddingEngine) {
    let engine = IndexEngine::open_in_memory().unwrap();
    let embedder = EmbeddingEngine::new(384);
    let collection = taqueria();
    engine
        .index_document(
            &collection,
            &doc("lataqueria_tacos_carnitas", "Carnitas Taco", "slow braised pork", 4.5),
            &embedder,
        )
        .unwrap();
    engine
        .index_document(
            &collection,
            &doc(
                "lataqueria_tacos_vegan",
                "Vegan Taco",
                "vegan jackfruit with salsa verde",
                5.0,
            ),
            &embedder,
        )
        .unwrap();
    (engine, embedder)
}

#[test]
fn metadata_fetch_joins_collection_fields() {
    let (engine, _) = seeded_engine();
    let records = engine
        .fetch(&["lataqueria_tacos_vegan".to_string()])
        .unwrap();
    assert_eq!(records.len(), 1);
    let fields = &records[0].fields;
    assert_eq!(fields["name"], json!("Vegan Taco"));
    assert_eq!(fields["collection"], json!("La Taqueria"));
    assert_eq!(fields["city"], json!("San Francisco"));
    assert_eq!(fields["price"], json!(5.0));
    // Numeric fields are f64 regardless of SQL storage class.
    assert_eq!(fields["review_count"], json!(812.0));
}

#[test]
fn metadata_fetch_omits_missing_ids() {
    let (engine, _) = seeded_engine();
    let records = engine
        .fetch(&[
            "lataqueria_tacos_vegan".to_string(),
            "nowhere_nothing_nil".to_string(),
        ])
        .unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn keyword_search_ranks_matching_documents() {
    let (engine, _) = seeded_engine();
    let hits = IKeywordIndex::query(&engine, "vegan jackfruit", 10).unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0].external_id, "lataqueria_tacos_vegan");
    assert!(hits[0].score > 0.0);
    assert_eq!(hits[0].metadata["collection"], json!("La Taqueria"));
}

#[test]
fn keyword_search_empty_terms_returns_empty() {
    let (engine, _) = seeded_engine();
    let hits = IKeywordIndex::query(&engine, "!!", 10).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn vector_search_finds_similar_document() {
    let (engine, embedder) = seeded_engine();
    let query = embedder.embed_query("vegan jackfruit salsa").unwrap();
    let hits = IVectorIndex::query(&engine, &query, 5).unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0].external_id, "lataqueria_tacos_vegan");
    // Payload mirrors the indexed metadata for degraded joins.
    assert_eq!(hits[0].payload["name"], json!("Vegan Taco"));
}

#[test]
fn vector_search_zero_query_returns_empty() {
    let (engine, _) = seeded_engine();
    let hits = IVectorIndex::query(&engine, &vec![0.0f32; 384], 5).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn vector_only_rows_are_queryable() {
    let engine = IndexEngine::open_in_memory().unwrap();
    let embedder = EmbeddingEngine::new(384);
    let embedding = embedder.embed_query("phantom dish").unwrap();
    let payload = json!({"name": "Phantom Dish", "price": 9.0})
        .as_object()
        .cloned()
        .unwrap();
    engine
        .store_vector_only("ghost_cat_item", &embedding, &payload)
        .unwrap();

    let hits = IVectorIndex::query(&engine, &embedding, 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].external_id, "ghost_cat_item");
    // But the relational store knows nothing about it.
    assert!(engine.fetch(&["ghost_cat_item".to_string()]).unwrap().is_empty());
}

#[test]
fn reingesting_updates_in_place() {
    let (engine, embedder) = seeded_engine();
    let collection = taqueria();
    engine
        .index_document(
            &collection,
            &doc("lataqueria_tacos_vegan", "Vegan Taco", "now with guacamole", 5.5),
            &embedder,
        )
        .unwrap();
    let records = engine
        .fetch(&["lataqueria_tacos_vegan".to_string()])
        .unwrap();
    assert_eq!(records[0].fields["price"], json!(5.5));
    assert_eq!(records[0].fields["description"], json!("now with guacamole"));
}

#[test]
fn file_backed_engine_reads_through_pool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let config = mensa_core::config::IndexConfig::default();
    let engine = IndexEngine::open(&path, &config).unwrap();
    let embedder = EmbeddingEngine::new(384);
    engine
        .index_document(
            &taqueria(),
            &doc("lataqueria_tacos_pollo", "Pollo Taco", "grilled chicken", 4.0),
            &embedder,
        )
        .unwrap();
    let hits = IKeywordIndex::query(&engine, "pollo chicken", 5).unwrap();
    assert_eq!(hits.len(), 1);
}
