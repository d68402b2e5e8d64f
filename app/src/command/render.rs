use memsift_core::JsonExport;
use memsift_extract::render_export;
use std::path::PathBuf;
use tracing::info;

use super::write_output;

/// Input parameters for the Render command strategy.
#[derive(Debug, Clone)]
pub struct RenderInput {
    /// A `json` aggregate written by `extract --format json`
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

/// Strategy for turning an aggregate into one "Remember that ..." phrase
/// per entry.
#[derive(Debug, Clone, Copy)]
pub struct RenderStrategy;

impl super::CommandStrategy for RenderStrategy {
    type Input = RenderInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let content = tokio::fs::read_to_string(&input.input)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", input.input.display()))?;
        let export: JsonExport = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid aggregate {}: {e}", input.input.display()))?;

        let phrases = render_export(&export);
        info!("Rendered {} phrase(s)", phrases.len());
        write_output(&phrases.join("\n"), input.output.as_ref())
    }
}
