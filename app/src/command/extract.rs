use memsift_core::OutputFormat;
use memsift_extract::{extract_paths, format_collection};
use std::path::PathBuf;
use tracing::{info, warn};

use super::{Overrides, build_engine, log_summary, write_output};

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub config: Option<PathBuf>,
    /// Files or directories; directories expand to the JSON files inside them
    pub paths: Vec<PathBuf>,
    /// Output file (stdout when absent)
    pub output: Option<PathBuf>,
    /// Output format override
    pub format: Option<String>,
    pub max_depth: Option<usize>,
    pub include_memory_payloads: bool,
}

/// Strategy for extracting marked memory entries from export files.
///
/// All inputs are merged into one deduplicated collection, which is
/// written as grouped text or as the `json` aggregate.
///
/// # Design
/// - Missing and unreadable inputs are logged and skipped
/// - Fails only when no input could be processed
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let (config, engine) = build_engine(
            input.config.as_deref(),
            Overrides {
                max_depth: input.max_depth,
                include_memory_payloads: input.include_memory_payloads,
            },
        )?;

        let format = match input.format.as_deref() {
            Some(raw) => raw.parse::<OutputFormat>().map_err(|e| anyhow::anyhow!(e))?,
            None => config.output.format,
        };

        let paths = input.paths;
        let report =
            tokio::task::spawn_blocking(move || extract_paths(&engine, &paths)).await??;

        if report.processed == 0 {
            anyhow::bail!("None of the {} input(s) could be processed", report.failed.len());
        }
        if !report.failed.is_empty() {
            warn!("{} input(s) skipped", report.failed.len());
        }
        info!("Processed {} file(s)", report.processed);
        log_summary(&report.collection);

        let content = format_collection(&report.collection, format)?;
        write_output(&content, input.output.as_ref())
    }
}
