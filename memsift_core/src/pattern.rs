//! Marker pattern definitions.
//!
//! Patterns are plain data so that configuration can extend the built-in
//! registry. Compilation lives in `memsift_extract`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::memory::Category;

/// What a pattern credits when it matches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// The whole trimmed text of the unit.
    #[default]
    WholeMessage,
    /// Only the text of the pattern's first capture group.
    CapturedGroup,
}

impl CaptureMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WholeMessage => "whole_message",
            Self::CapturedGroup => "captured_group",
        }
    }
}

impl FromStr for CaptureMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whole_message" | "whole" | "message" => Ok(Self::WholeMessage),
            "captured_group" | "capture" | "group" => Ok(Self::CapturedGroup),
            _ => Err("unknown capture mode"),
        }
    }
}

/// Definition of a single marker pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDef {
    /// Unique identifier, used in diagnostics.
    pub id: String,

    /// Regex source. Always compiled case-insensitive and multi-line.
    pub pattern: String,

    /// Category credited on a match (`to_bio`, `project`, `generic`).
    pub category: String,

    /// `whole_message` or `captured_group`.
    #[serde(default = "PatternDef::default_mode")]
    pub mode: String,
}

impl PatternDef {
    fn default_mode() -> String {
        CaptureMode::WholeMessage.as_str().to_string()
    }

    #[must_use]
    pub fn new(id: &str, pattern: &str, category: Category, mode: CaptureMode) -> Self {
        Self {
            id: id.to_string(),
            pattern: pattern.to_string(),
            category: category.as_str().to_string(),
            mode: mode.as_str().to_string(),
        }
    }
}
