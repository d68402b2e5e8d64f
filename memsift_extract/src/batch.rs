//! Batch runs: one fragment document per input file, or one for a whole tree.

use memsift_core::{Error, FieldBag, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::aggregate::{Aggregator, MemoryCollection};
use crate::engine::ExtractionEngine;
use crate::export::{FragmentDocument, fragment_file_name};
use crate::inputs::{json_files_in, resolve_inputs};

/// Outcome of merging many inputs into one collection.
#[derive(Debug)]
pub struct ExtractReport {
    pub collection: MemoryCollection,
    pub processed: usize,
    /// Unresolvable paths and files that failed, in input order.
    pub failed: Vec<Error>,
}

/// Resolve `paths`, extract every file and merge them into one collection.
///
/// # Errors
/// Returns [`Error::NoInputs`] when no path resolves to a file.
pub fn extract_paths(engine: &ExtractionEngine, paths: &[PathBuf]) -> Result<ExtractReport> {
    let resolved = resolve_inputs(paths, false);
    if resolved.files.is_empty() {
        return Err(Error::NoInputs);
    }

    let mut failed = resolved.errors;
    let mut aggregator = Aggregator::new();
    for (input, result) in engine.extract_files(&resolved.files) {
        match result {
            Ok(extraction) => aggregator.absorb(extraction),
            Err(e) => {
                warn!("Error processing file {}: {e}", input.display());
                failed.push(e);
            }
        }
    }

    let processed = aggregator.documents();
    Ok(ExtractReport {
        collection: aggregator.finalize(),
        processed,
        failed,
    })
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output documents written.
    pub written: Vec<PathBuf>,
    /// Inputs that failed, with the reason.
    pub failed: Vec<Error>,
}

impl BatchReport {
    /// At least one input made it through.
    #[must_use]
    pub fn any_succeeded(&self) -> bool {
        !self.written.is_empty()
    }
}

fn write_document(doc: &FragmentDocument, path: &Path) -> Result<()> {
    let json = doc.to_json().map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    std::fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract every `*.json` file directly inside `input_dir`, writing
/// `memory_fragments_<stem>.json` into `output_dir` for each.
///
/// # Errors
/// Returns [`Error::InputNotFound`] if `input_dir` is not a directory,
/// [`Error::NoInputs`] if it holds no JSON files, and [`Error::Io`] if the
/// output directory cannot be created. Per-file failures land in the report.
pub fn run_batch(
    engine: &ExtractionEngine,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    if !input_dir.is_dir() {
        return Err(Error::InputNotFound {
            path: input_dir.to_path_buf(),
        });
    }

    let files = json_files_in(input_dir, false)?;
    if files.is_empty() {
        return Err(Error::NoInputs);
    }

    std::fs::create_dir_all(output_dir).map_err(|source| Error::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    info!("Found {} JSON file(s) to process", files.len());

    let mut report = BatchReport::default();
    for (input, result) in engine.extract_files(&files) {
        let written = result.and_then(|extraction| {
            let doc = FragmentDocument::new(extraction.fields, &input);
            let target = output_dir.join(fragment_file_name(&input));
            write_document(&doc, &target).map(|()| target)
        });
        match written {
            Ok(target) => {
                info!("Memory fragments exported to: {}", target.display());
                report.written.push(target);
            }
            Err(e) => {
                warn!("Failed to process {}: {e}", input.display());
                report.failed.push(e);
            }
        }
    }

    info!(
        "Batch complete: {} succeeded, {} failed",
        report.written.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Outcome of scraping one path.
#[derive(Debug)]
pub struct ScrapeReport {
    pub fields: FieldBag,
    pub processed: usize,
    pub failed: Vec<Error>,
}

/// Scrape a single file, or every `*.json` file below a directory, into one
/// field bag. Inside a directory a failing file is reported and skipped.
///
/// # Errors
/// Returns [`Error::InputNotFound`] for a missing path and the file's own
/// error when a single file cannot be extracted.
pub fn scrape_path(engine: &ExtractionEngine, path: &Path) -> Result<ScrapeReport> {
    if !path.exists() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_file() {
        let extraction = engine.extract_file(path)?;
        return Ok(ScrapeReport {
            fields: extraction.fields,
            processed: 1,
            failed: Vec::new(),
        });
    }

    let files = json_files_in(path, true)?;
    let mut report = ScrapeReport {
        fields: FieldBag::new(),
        processed: 0,
        failed: Vec::new(),
    };
    for (input, result) in engine.extract_files(&files) {
        match result {
            Ok(extraction) => {
                report.fields.merge(extraction.fields);
                report.processed += 1;
            }
            Err(e) => {
                warn!("Could not process {}: {e}", input.display());
                report.failed.push(e);
            }
        }
    }
    Ok(report)
}

/// Write a scraped field bag as a fragment document, creating parent directories.
///
/// # Errors
/// Returns [`Error::Io`] when the document cannot be written.
pub fn write_fragments(fields: FieldBag, origin: &Path, output: &Path) -> Result<PathBuf> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let doc = FragmentDocument::new(fields, origin);
    write_document(&doc, output)?;
    Ok(output.to_path_buf())
}
