use memsift_extract::{scrape_path, write_fragments};
use std::path::PathBuf;
use tracing::info;

use super::{Overrides, build_engine};

const DEFAULT_OUTPUT: &str = "memory_fragments.json";

/// Input parameters for the Scrape command strategy.
#[derive(Debug, Clone)]
pub struct ScrapeInput {
    pub config: Option<PathBuf>,
    /// A JSON file, or a directory searched recursively
    pub path: PathBuf,
    /// Defaults to `memory_fragments.json`
    pub output_file: Option<PathBuf>,
}

/// Strategy for scraping bio, profile and keyword fields into a single
/// fragment document.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeStrategy;

impl super::CommandStrategy for ScrapeStrategy {
    type Input = ScrapeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let (_, engine) = build_engine(input.config.as_deref(), Overrides::default())?;
        let output = input
            .output_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let path = input.path;

        let written = tokio::task::spawn_blocking(move || -> anyhow::Result<PathBuf> {
            let report = scrape_path(&engine, &path)?;
            if report.processed == 0 {
                anyhow::bail!("No JSON file under {} could be processed", path.display());
            }
            info!(
                "Scraped {} file(s), {} failed",
                report.processed,
                report.failed.len()
            );
            Ok(write_fragments(report.fields, &path, &output)?)
        })
        .await??;

        info!("Memory fragments exported to: {}", written.display());
        Ok(())
    }
}
