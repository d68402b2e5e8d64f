//! Integration tests for the extraction pipeline.
//!
//! These tests verify that:
//! - Marker entries come out trimmed, categorized and deduplicated
//! - Every known export layout is handled by the same walk
//! - The depth ceiling cuts off deeper levels without failing
//! - The json aggregate renders to the expected phrases

use memsift_core::{Category, ExtractionConfig, JsonExport, WalkerConfig};
use memsift_extract::{Aggregator, ExtractionEngine, finalize, render_export};
use serde_json::{Value, json};

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn engine_with_depth(max_depth: usize) -> ExtractionEngine {
    ExtractionEngine::new(WalkerConfig { max_depth }, ExtractionConfig::default())
        .expect("default patterns compile")
}

fn collect(docs: &[Value]) -> memsift_extract::MemoryCollection {
    let engine = engine_with_depth(10);
    let mut aggregator = Aggregator::new();
    for doc in docs {
        aggregator.absorb(engine.extract_value(doc));
    }
    aggregator.finalize()
}

#[test]
fn test_to_bio_message_yields_captured_text() {
    let collection = collect(&[json!([
        {"role": "user", "content": "TO:BIO I live in Seattle"}
    ])]);

    assert_eq!(collection.len(), 1);
    assert_eq!(
        collection.category(Category::ToBio),
        ["I live in Seattle".to_string()]
    );
}

#[test]
fn test_case_variants_collapse() {
    let collection = collect(&[json!([
        {"role": "user", "content": "Save this note: call mom"},
        {"role": "user", "content": "save this note: call mom"}
    ])]);

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.category(Category::Generic).len(), 1);
}

#[test]
fn test_matching_is_case_insensitive() {
    let upper = collect(&[json!([{"content": "TO:BIO plays the cello"}])]);
    let lower = collect(&[json!([{"content": "to:bio plays the cello"}])]);
    assert_eq!(upper, lower);
}

#[test]
fn test_all_export_layouts() {
    let message = |text: &str| json!({"author": {"role": "user"}, "content": {"parts": [text]}});

    let mapping = json!({
        "title": "Weekend",
        "mapping": {"a": {"message": message("TO:BIO grows tomatoes")}}
    });
    let messages = json!({
        "title": "Work",
        "messages": [{"role": "user", "content": "memory/project: kiln controller"}]
    });
    let wrapped = json!({"conversations": [{
        "title": "add to canon: the house rules",
        "mapping": {"b": {"message": message("update memory: new phone number")}}
    }]});
    let list = json!([mapping.clone(), messages.clone()]);

    let collection = collect(&[mapping, messages, wrapped, list]);

    assert_eq!(
        collection.category(Category::ToBio),
        ["grows tomatoes".to_string()]
    );
    assert_eq!(
        collection.category(Category::Project),
        ["kiln controller".to_string()]
    );
    assert_eq!(
        collection.category(Category::Generic),
        [
            "add to canon: the house rules".to_string(),
            "update memory: new phone number".to_string()
        ]
    );
}

#[test]
fn test_depth_ceiling_drops_deeper_level() {
    // Message objects sit at depth 1 (array -> object).
    let doc = json!([
        {"content": "TO:BIO shallow fact"},
        [{"content": "TO:BIO deep fact"}]
    ]);

    let shallow = engine_with_depth(1).extract_value(&doc);
    let deep = engine_with_depth(2).extract_value(&doc);

    let texts = |entries: &[memsift_core::MemoryEntry]| {
        entries.iter().map(|e| e.text.clone()).collect::<Vec<_>>()
    };
    assert_eq!(texts(&shallow.entries), vec!["shallow fact".to_string()]);
    assert_eq!(
        texts(&deep.entries),
        vec!["shallow fact".to_string(), "deep fact".to_string()]
    );
}

#[test]
fn test_no_entry_is_blank() {
    let collection = collect(&[json!([
        {"content": "   "},
        {"content": {"parts": []}},
        {"content": "save this note", "metadata": {"memory": "   "}}
    ])]);

    for entry in collection.entries() {
        assert!(!entry.text.trim().is_empty());
    }
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_finalize_is_idempotent_over_raw_entries() {
    let engine = engine_with_depth(10);
    let doc = json!([
        {"content": "TO:BIO Likes tea"},
        {"content": "to:bio likes tea"},
        {"content": "PROJECT: Greenhouse sensors"}
    ]);
    let raw = engine.extract_value(&doc);

    let first = finalize(raw.entries.clone(), raw.fields.clone());
    let second = finalize(raw.entries, raw.fields);
    assert_eq!(first, second);
    assert_eq!(first.category(Category::ToBio), ["Likes tea".to_string()]);
}

#[test]
fn test_fields_are_scraped_in_the_same_walk() {
    let collection = collect(&[json!({
        "user": {"name": "Robin", "about": "Cellist", "interests": ["music", "tea"]},
        "messages": [{"role": "user", "content": "tuck this away: locker 42"}]
    })]);

    let fields = collection.fields();
    assert_eq!(fields.profile.get("name"), Some(&json!("Robin")));
    assert_eq!(fields.bio.get("about"), Some(&json!("Cellist")));
    assert_eq!(fields.keywords.len(), 2);
    assert_eq!(collection.category(Category::Generic).len(), 1);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_json_aggregate_renders_phrases() {
    let collection = collect(&[json!([{"content": "TO:BIO loves hiking"}])]);
    let json = memsift_extract::to_json(&collection).expect("collection serializes");
    let export: JsonExport = serde_json::from_str(&json).expect("aggregate parses back");

    assert_eq!(render_export(&export), vec!["Remember that loves hiking.".to_string()]);
}
