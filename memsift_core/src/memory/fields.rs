use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Named fields scraped from export objects, independent of marker matching.
///
/// `bio` and `profile` are last-write-wins by traversal order, `keywords`
/// accumulate as a set. `memory` only fills when raw payload capture is
/// switched on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldBag {
    #[serde(default)]
    pub bio: Map<String, Value>,
    #[serde(default)]
    pub profile: Map<String, Value>,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default)]
    pub memory: Vec<Value>,
}

impl FieldBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bio.is_empty()
            && self.profile.is_empty()
            && self.keywords.is_empty()
            && self.memory.is_empty()
    }

    /// Fold a later bag into this one, with the same rules as a single walk.
    pub fn merge(&mut self, later: Self) {
        self.bio.extend(later.bio);
        self.profile.extend(later.profile);
        self.keywords.extend(later.keywords);
        self.memory.extend(later.memory);
    }
}
