//! Output documents: grouped text, the `json` aggregate, and per-source
//! memory fragment documents.

use chrono::Utc;
use memsift_core::{Category, FieldBag, OutputFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::aggregate::MemoryCollection;

/// Version stamped into fragment document metadata.
pub const FRAGMENT_FORMAT_VERSION: &str = "1.0.0";

/// Grouped text: a heading per non-empty category, then `- entry` bullets.
#[must_use]
pub fn to_text(collection: &MemoryCollection) -> String {
    let mut lines = Vec::new();
    for category in Category::ALL {
        let items = collection.category(category);
        if items.is_empty() {
            continue;
        }
        lines.push(format!("=== {} ===\n", category.heading()));
        lines.extend(items.iter().map(|item| format!("- {item}")));
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Pretty-printed `{"to_bio": [...], "projects": [...], "memories": [...]}`.
pub fn to_json(collection: &MemoryCollection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&collection.to_export())
}

pub fn format_collection(
    collection: &MemoryCollection,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(to_text(collection)),
        OutputFormat::Json => to_json(collection),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentMetadata {
    pub source: String,
    pub scraped_at: String,
    pub version: String,
}

/// Field bag of one source, as written by `batch` and `scrape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentDocument {
    pub bio: Map<String, Value>,
    pub profile: Map<String, Value>,
    pub memory: Vec<Value>,
    pub keywords: Vec<String>,
    pub metadata: FragmentMetadata,
}

impl FragmentDocument {
    /// Stamp a field bag with its source and the current UTC time.
    #[must_use]
    pub fn new(fields: FieldBag, source: &Path) -> Self {
        Self {
            bio: fields.bio,
            profile: fields.profile,
            memory: fields.memory,
            keywords: fields.keywords.into_iter().collect(),
            metadata: FragmentMetadata {
                source: source.display().to_string(),
                scraped_at: Utc::now().to_rfc3339(),
                version: FRAGMENT_FORMAT_VERSION.to_string(),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Output file name for a batch input: `memory_fragments_<stem>.json`.
#[must_use]
pub fn fragment_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map_or_else(|| "input".into(), |s| s.to_string_lossy());
    format!("memory_fragments_{stem}.json")
}
