use memsift_extract::run_batch;
use std::path::PathBuf;

use super::{Overrides, build_engine};

/// Input parameters for the Batch command strategy.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub config: Option<PathBuf>,
    pub input_dir: PathBuf,
    /// Defaults to `batch.output_dir` from the config
    pub output_dir: Option<PathBuf>,
}

/// Strategy for writing one memory fragment document per input file.
///
/// # Design
/// - A failing file does not stop the batch
/// - Fails when the directory is missing, empty, or nothing succeeded
#[derive(Debug, Clone, Copy)]
pub struct BatchStrategy;

impl super::CommandStrategy for BatchStrategy {
    type Input = BatchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let (config, engine) = build_engine(input.config.as_deref(), Overrides::default())?;
        let output_dir = input
            .output_dir
            .unwrap_or_else(|| PathBuf::from(config.batch.output_dir));
        let input_dir = input.input_dir;

        let report =
            tokio::task::spawn_blocking(move || run_batch(&engine, &input_dir, &output_dir))
                .await??;

        if !report.any_succeeded() {
            anyhow::bail!("All {} file(s) failed", report.failed.len());
        }
        Ok(())
    }
}
