//! Deduplication and aggregation of extracted entries.
//!
//! Entries are keyed by `(category, lowercase(trim(text)))`. Within a
//! category the output is sorted, and of several surface forms of one
//! logical entry the lexicographically smallest is kept, so the result
//! does not depend on the order inputs were processed in.

use memsift_core::{Category, FieldBag, JsonExport, MemoryEntry};
use std::collections::BTreeMap;

use crate::engine::Extraction;

/// The finalized result of a run. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCollection {
    to_bio: Vec<String>,
    projects: Vec<String>,
    memories: Vec<String>,
    fields: FieldBag,
}

impl MemoryCollection {
    /// Sorted, deduplicated texts of one category.
    #[must_use]
    pub fn category(&self, category: Category) -> &[String] {
        match category {
            Category::ToBio => &self.to_bio,
            Category::Project => &self.projects,
            Category::Generic => &self.memories,
        }
    }

    #[must_use]
    pub const fn fields(&self) -> &FieldBag {
        &self.fields
    }

    /// All entries in category order.
    pub fn entries(&self) -> impl Iterator<Item = MemoryEntry> + '_ {
        Category::ALL.into_iter().flat_map(move |category| {
            self.category(category).iter().map(move |text| MemoryEntry {
                category,
                text: text.clone(),
            })
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.to_bio.len() + self.projects.len() + self.memories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn to_export(&self) -> JsonExport {
        JsonExport {
            to_bio: self.to_bio.clone(),
            projects: self.projects.clone(),
            memories: self.memories.clone(),
        }
    }
}

/// Deduplicate raw entries and seal them with a field bag.
#[must_use]
pub fn finalize<I>(raw: I, fields: FieldBag) -> MemoryCollection
where
    I: IntoIterator<Item = MemoryEntry>,
{
    let mut canonical: BTreeMap<(Category, String), String> = BTreeMap::new();

    for entry in raw {
        let text = entry.text.trim();
        if text.is_empty() {
            continue;
        }
        canonical
            .entry(entry.dedup_key())
            .and_modify(|kept| {
                if text < kept.as_str() {
                    *kept = text.to_string();
                }
            })
            .or_insert_with(|| text.to_string());
    }

    let mut collection = MemoryCollection {
        fields,
        ..MemoryCollection::default()
    };
    for ((category, _), text) in canonical {
        match category {
            Category::ToBio => collection.to_bio.push(text),
            Category::Project => collection.projects.push(text),
            Category::Generic => collection.memories.push(text),
        }
    }
    collection.to_bio.sort();
    collection.projects.sort();
    collection.memories.sort();
    collection
}

/// Per-run accumulator. Documents are folded in processing order and the
/// whole run is finalized once.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: Vec<MemoryEntry>,
    fields: FieldBag,
    documents: usize,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, extraction: Extraction) {
        self.entries.extend(extraction.entries);
        self.fields.merge(extraction.fields);
        self.documents += 1;
    }

    /// Documents absorbed so far.
    #[must_use]
    pub const fn documents(&self) -> usize {
        self.documents
    }

    #[must_use]
    pub fn finalize(self) -> MemoryCollection {
        finalize(self.entries, self.fields)
    }
}
