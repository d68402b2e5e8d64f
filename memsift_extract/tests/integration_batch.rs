//! Integration tests for file-based runs.
//!
//! These tests verify that:
//! - A batch writes one fragment document per readable input
//! - Malformed inputs are reported without aborting the batch
//! - Missing paths and empty directories surface as errors
//! - Scraping a directory merges every file below it

use memsift_core::{Category, Error};
use memsift_extract::{
    ExtractionEngine, FragmentDocument, extract_paths, run_batch, scrape_path, write_fragments,
};
use std::path::{Path, PathBuf};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("memsift_it_{tag}_{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::write(path, contents).ok();
}

#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn engine() -> ExtractionEngine {
    ExtractionEngine::with_defaults().expect("default patterns compile")
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_batch_with_one_bad_file() {
    let dir = scratch_dir("batch");
    let input = dir.join("in");
    let output = dir.join("out");
    write(
        &input.join("good.json"),
        r#"{"user": {"name": "Robin", "bio": "Cellist"}, "tags": ["music"]}"#,
    );
    write(&input.join("bad.json"), "{ not json");

    let report = run_batch(&engine(), &input, &output).expect("batch runs");

    assert!(report.any_succeeded());
    assert_eq!(report.written, vec![output.join("memory_fragments_good.json")]);
    assert!(matches!(
        report.failed.as_slice(),
        [Error::MalformedDocument { path, .. }] if path.ends_with("bad.json")
    ));

    let written = std::fs::read_to_string(&report.written[0]).expect("fragment written");
    let doc: FragmentDocument = serde_json::from_str(&written).expect("fragment parses");
    assert_eq!(doc.profile["name"], serde_json::json!("Robin"));
    assert_eq!(doc.bio["bio"], serde_json::json!("Cellist"));
    assert_eq!(doc.keywords, vec!["music".to_string()]);
    assert_eq!(doc.metadata.version, "1.0.0");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_batch_rejects_missing_and_empty_directories() {
    let dir = scratch_dir("empty");

    let missing = run_batch(&engine(), &dir.join("nope"), &dir.join("out"));
    assert!(matches!(missing, Err(Error::InputNotFound { .. })));

    let empty = run_batch(&engine(), &dir, &dir.join("out"));
    assert!(matches!(empty, Err(Error::NoInputs)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_extract_paths_skips_missing_inputs() {
    let dir = scratch_dir("extract");
    let first = dir.join("one.json");
    let second = dir.join("two.json");
    write(&first, r#"[{"role": "user", "content": "TO:BIO I live in Seattle"}]"#);
    write(
        &second,
        r#"{"messages": [{"role": "user", "content": "to:bio i live in seattle"}]}"#,
    );

    let report = extract_paths(&engine(), &[first, dir.join("missing.json"), second])
        .expect("some inputs resolve");

    assert_eq!(report.processed, 2);
    assert!(matches!(
        report.failed.as_slice(),
        [Error::InputNotFound { .. }]
    ));
    assert_eq!(
        report.collection.category(Category::ToBio),
        ["I live in Seattle".to_string()]
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_extract_paths_without_inputs() {
    let dir = scratch_dir("none");
    let result = extract_paths(&engine(), &[dir.join("missing.json")]);
    assert!(matches!(result, Err(Error::NoInputs)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_scrape_directory_recursively() {
    let dir = scratch_dir("scrape");
    write(&dir.join("a.json"), r#"{"about": "first", "topics": ["x"]}"#);
    write(
        &dir.join("nested").join("b.json"),
        r#"{"about": "second", "topics": ["y"]}"#,
    );
    write(&dir.join("nested").join("broken.json"), "[");

    let report = scrape_path(&engine(), &dir).expect("directory scrapes");
    assert_eq!(report.processed, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.fields.bio["about"], serde_json::json!("second"));
    assert_eq!(report.fields.keywords.len(), 2);

    let target = dir.join("out").join("memory_fragments.json");
    let written = write_fragments(report.fields, &dir, &target).expect("fragments written");
    assert!(written.is_file());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_scrape_single_malformed_file_fails() {
    let dir = scratch_dir("single");
    let path = dir.join("broken.json");
    write(&path, "{");

    let result = scrape_path(&engine(), &path);
    assert!(matches!(result, Err(Error::MalformedDocument { .. })));

    let _ = std::fs::remove_dir_all(&dir);
}
