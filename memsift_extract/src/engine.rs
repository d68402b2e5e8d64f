//! Extraction engine.
//!
//! One walk per document feeds both the marker extractor and the field
//! scraper. Files are independent, so a batch is extracted in parallel and
//! handed back in input order for a sequential merge.

use memsift_core::{Error, ExtractionConfig, FieldBag, MemoryEntry, Result, WalkerConfig};
use rayon::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::fields::FieldScraper;
use crate::marker::MarkerExtractor;
use crate::patterns::PatternRegistry;
use crate::shape::{DocumentShape, json_kind};
use crate::walker::{NodeVisitor, Walker};

/// Raw output of one document, before deduplication.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub entries: Vec<MemoryEntry>,
    pub fields: FieldBag,
}

/// Extraction engine holding the compiled registry and run settings.
pub struct ExtractionEngine {
    registry: PatternRegistry,
    walker: WalkerConfig,
    config: ExtractionConfig,
}

impl ExtractionEngine {
    /// Create a new engine, compiling the pattern registry.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPattern`] if a pattern fails to compile.
    pub fn new(walker: WalkerConfig, config: ExtractionConfig) -> Result<Self> {
        let registry = PatternRegistry::new(&config).map_err(|(id, e)| Error::InvalidPattern {
            id,
            reason: e.to_string(),
        })?;
        debug!(
            "Compiled {} marker patterns, max depth {}",
            registry.len(),
            walker.max_depth
        );
        Ok(Self {
            registry,
            walker,
            config,
        })
    }

    /// Create an engine with default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(WalkerConfig::default(), ExtractionConfig::default())
    }

    #[must_use]
    pub const fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn walker_config(&self) -> WalkerConfig {
        self.walker
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Walk any JSON value and collect entries and fields.
    #[must_use]
    pub fn extract_value(&self, root: &Value) -> Extraction {
        let mut markers = MarkerExtractor::new(&self.registry, self.config.metadata_memory);
        let mut fields = FieldScraper::new(self.config.include_memory_payloads);

        let mut visitors: [&mut dyn NodeVisitor; 2] = [&mut markers, &mut fields];
        let truncated = Walker::new(root, self.walker).drive(&mut visitors);
        if truncated > 0 {
            debug!(
                "Skipped {truncated} containers below depth {}",
                self.walker.max_depth
            );
        }

        Extraction {
            entries: markers.into_entries(),
            fields: fields.into_bag(),
        }
    }

    /// Extract a parsed document, rejecting scalar roots.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedShape`] when the root is not an object or array.
    pub fn extract_document(&self, path: &Path, root: &Value) -> Result<Extraction> {
        let Some(shape) = DocumentShape::detect(root) else {
            return Err(Error::UnsupportedShape {
                path: path.to_path_buf(),
                kind: json_kind(root),
            });
        };
        debug!("{} looks like a {}", path.display(), shape.as_str());
        Ok(self.extract_value(root))
    }

    /// Read, parse and extract one file.
    ///
    /// Bytes that are not valid UTF-8 JSON are a malformed document.
    ///
    /// # Errors
    /// Returns [`Error::InputNotFound`], [`Error::Io`], [`Error::MalformedDocument`]
    /// or [`Error::UnsupportedShape`].
    pub fn extract_file(&self, path: &Path) -> Result<Extraction> {
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::InputNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let root: Value =
            serde_json::from_slice(&bytes).map_err(|source| Error::MalformedDocument {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Processing: {}", path.display());
        self.extract_document(path, &root)
    }

    /// Extract many files in parallel. Results come back in input order.
    #[must_use]
    pub fn extract_files(&self, paths: &[PathBuf]) -> Vec<(PathBuf, Result<Extraction>)> {
        paths
            .par_iter()
            .map(|path| (path.clone(), self.extract_file(path)))
            .collect()
    }
}
