#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod memory;
pub mod options;
pub mod pattern;

pub use error::{Error, Result};
pub use memory::{Category, ExtractedUnit, FieldBag, JsonExport, MemoryEntry};
pub use options::{ExtractionConfig, OutputFormat, WalkerConfig};
pub use pattern::{CaptureMode, PatternDef};
