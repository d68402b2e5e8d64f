//! Marker extraction over normalized message units.

use memsift_core::{Category, ExtractedUnit, MemoryEntry};
use serde_json::{Map, Value};
use tracing::trace;

use crate::patterns::PatternRegistry;
use crate::walker::NodeVisitor;

/// Normalize a message-like object into a text unit.
///
/// `content` may be a string or an object with a `parts` list; only the
/// first part is read, and a missing or non-string first part reads as
/// empty text. Objects without `content` are not messages.
#[must_use]
pub fn message_unit(node: &Map<String, Value>) -> Option<ExtractedUnit<'_>> {
    let text = match node.get("content")? {
        Value::String(text) => text.as_str(),
        Value::Object(content) => content
            .get("parts")
            .and_then(Value::as_array)
            .and_then(|parts| parts.first())
            .and_then(Value::as_str)
            .unwrap_or(""),
        _ => return None,
    };

    let role = node.get("role").and_then(Value::as_str).or_else(|| {
        node.get("author")
            .and_then(|author| author.get("role"))
            .and_then(Value::as_str)
    });

    Some(ExtractedUnit::new(role, text))
}

/// String parts after the first. Only captured-group patterns read these.
fn later_parts(node: &Map<String, Value>) -> Vec<&str> {
    node.get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| parts.iter().skip(1).filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Entries from a message's `metadata.memory` annotation.
fn metadata_memory(node: &Map<String, Value>) -> Vec<MemoryEntry> {
    let Some(memory) = node.get("metadata").and_then(|m| m.get("memory")) else {
        return Vec::new();
    };
    match memory {
        Value::String(text) => MemoryEntry::new(Category::Generic, text).into_iter().collect(),
        Value::Object(fields) => fields
            .iter()
            .filter_map(|(key, value)| {
                let value = value.as_str()?;
                MemoryEntry::new(Category::Generic, &format!("{key}: {value}"))
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Applies the pattern registry to titles and message bodies.
pub struct MarkerExtractor<'r> {
    registry: &'r PatternRegistry,
    metadata_memory: bool,
    entries: Vec<MemoryEntry>,
}

impl<'r> MarkerExtractor<'r> {
    #[must_use]
    pub const fn new(registry: &'r PatternRegistry, metadata_memory: bool) -> Self {
        Self {
            registry,
            metadata_memory,
            entries: Vec::new(),
        }
    }

    /// Every accepted match of every pattern against the unit's text.
    #[must_use]
    pub fn extract(&self, unit: ExtractedUnit<'_>) -> Vec<MemoryEntry> {
        self.extract_parts(unit, &[])
    }

    /// As [`extract`](Self::extract), with capture-only scanning of the
    /// message's remaining parts.
    #[must_use]
    pub fn extract_parts(&self, unit: ExtractedUnit<'_>, later: &[&str]) -> Vec<MemoryEntry> {
        let entries: Vec<MemoryEntry> = self
            .registry
            .scan_parts(unit.text, later)
            .into_iter()
            .filter_map(|m| MemoryEntry::new(m.category, &m.text))
            .collect();
        if !entries.is_empty() {
            trace!(
                role = unit.role.unwrap_or("-"),
                "{} marker entries from unit",
                entries.len()
            );
        }
        entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<MemoryEntry> {
        self.entries
    }
}

impl NodeVisitor for MarkerExtractor<'_> {
    fn visit(&mut self, node: &Map<String, Value>, _depth: usize) {
        if let Some(title) = node.get("title").and_then(Value::as_str) {
            let found = self.extract(ExtractedUnit::new(None, title));
            self.entries.extend(found);
        }

        if let Some(unit) = message_unit(node) {
            let found = self.extract_parts(unit, &later_parts(node));
            self.entries.extend(found);
            if self.metadata_memory {
                self.entries.extend(metadata_memory(node));
            }
        }
    }
}
