use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::pattern::PatternDef;

/// Rendering of an aggregated collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Heading per category, one `- entry` bullet per line.
    #[default]
    Text,
    /// `{"to_bio": [...], "projects": [...], "memories": [...]}`
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err("unknown output format, expected 'text' or 'json'"),
        }
    }
}

/// Structural walker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Deepest level visited; the root is level 0.
    #[serde(default = "WalkerConfig::default_max_depth")]
    pub max_depth: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::default_max_depth(),
        }
    }
}

impl WalkerConfig {
    const fn default_max_depth() -> usize {
        10
    }
}

/// Marker extraction and field scraping settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Captured text shorter than this many characters is dropped.
    #[serde(default = "ExtractionConfig::default_min_capture_len")]
    pub min_capture_len: usize,

    /// Captured text equal (ignoring case) to one of these is dropped.
    #[serde(default = "ExtractionConfig::default_denylist")]
    pub denylist: Vec<String>,

    /// Turn `metadata.memory` annotations on messages into generic entries.
    #[serde(default = "ExtractionConfig::default_metadata_memory")]
    pub metadata_memory: bool,

    /// Copy raw memory/embedding payloads into the field bag. Off by default.
    #[serde(default)]
    pub include_memory_payloads: bool,

    /// Patterns appended to the built-in registry.
    #[serde(default)]
    pub extra_patterns: Vec<PatternDef>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_capture_len: Self::default_min_capture_len(),
            denylist: Self::default_denylist(),
            metadata_memory: Self::default_metadata_memory(),
            include_memory_payloads: false,
            extra_patterns: Vec::new(),
        }
    }
}

impl ExtractionConfig {
    const fn default_min_capture_len() -> usize {
        4
    }

    fn default_denylist() -> Vec<String> {
        vec!["content".to_string(), "parts".to_string()]
    }

    const fn default_metadata_memory() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn empty_objects_take_defaults() {
        let walker: WalkerConfig = serde_json::from_str("{}").expect("walker config");
        let extraction: ExtractionConfig = serde_json::from_str("{}").expect("extraction config");

        assert_eq!(walker, WalkerConfig::default());
        assert_eq!(extraction, ExtractionConfig::default());
        assert!(!extraction.include_memory_payloads);
        assert_eq!(extraction.min_capture_len, 4);
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
