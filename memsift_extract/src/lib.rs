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

pub mod aggregate;
pub mod batch;
pub mod engine;
pub mod export;
pub mod fields;
pub mod inputs;
pub mod marker;
pub mod patterns;
pub mod render;
pub mod shape;
pub mod walker;

pub use aggregate::{Aggregator, MemoryCollection, finalize};
pub use batch::{
    BatchReport, ExtractReport, ScrapeReport, extract_paths, run_batch, scrape_path,
    write_fragments,
};
pub use engine::{Extraction, ExtractionEngine};
pub use export::{FragmentDocument, format_collection, to_json, to_text};
pub use fields::{FieldScraper, scrape_fields};
pub use inputs::{ResolvedInputs, json_files_in, resolve_inputs};
pub use marker::{MarkerExtractor, message_unit};
pub use patterns::{BuildError, MarkerMatch, MarkerPattern, PatternRegistry, default_patterns};
pub use render::{render, render_export};
pub use shape::DocumentShape;
pub use walker::{NodeVisitor, Visit, Walker};
