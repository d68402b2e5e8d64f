//! Memory entry types.
//!
//! A [`MemoryEntry`] is one categorized memory extracted from a transcript.
//! Two entries are the same logical memory when their [`MemoryEntry::dedup_key`]
//! values are equal, whatever their original casing or surrounding whitespace.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of memory an entry belongs to.
///
/// Declaration order is the output order of grouped exports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    /// Notes the operator wants in their bio: "TO:BIO I live in Seattle"
    ToBio = 0,
    /// Project references: "memory/project: garden planner"
    Project = 1,
    /// Anything else flagged for memory: "save this note: call mom"
    Generic = 2,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::ToBio, Self::Project, Self::Generic];

    /// Returns the string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ToBio => "to_bio",
            Self::Project => "project",
            Self::Generic => "generic",
        }
    }

    /// Key of this category in the `json` aggregate export.
    #[must_use]
    pub const fn export_key(&self) -> &'static str {
        match self {
            Self::ToBio => "to_bio",
            Self::Project => "projects",
            Self::Generic => "memories",
        }
    }

    /// Heading used by the `text` export.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::ToBio => "TO:BIO Content",
            Self::Project => "Projects",
            Self::Generic => "Other Memories",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "to_bio" | "to-bio" | "tobio" | "bio" => Ok(Self::ToBio),
            "project" | "projects" => Ok(Self::Project),
            "generic" | "memory" | "memories" => Ok(Self::Generic),
            _ => Err("unknown memory category"),
        }
    }
}

/// One extracted memory. `text` is always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub category: Category,
    pub text: String,
}

impl MemoryEntry {
    /// Build an entry from raw text, trimming it.
    ///
    /// Returns `None` when nothing but whitespace remains.
    #[must_use]
    pub fn new(category: Category, text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            category,
            text: trimmed.to_string(),
        })
    }

    /// Identity used for deduplication: category plus lowercased trimmed text.
    #[must_use]
    pub fn dedup_key(&self) -> (Category, String) {
        (self.category, self.text.trim().to_lowercase())
    }
}

/// A message-like unit of text normalized out of a JSON node.
///
/// Lives only as long as the marker extractor needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedUnit<'a> {
    pub role: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> ExtractedUnit<'a> {
    #[must_use]
    pub const fn new(role: Option<&'a str>, text: &'a str) -> Self {
        Self { role, text }
    }
}
