//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input. Extraction
//! work is blocking file and CPU work, so strategies hand it to
//! `tokio::task::spawn_blocking`.

use memsift_config::Config;
use memsift_extract::{ExtractionEngine, MemoryCollection};
use std::path::{Path, PathBuf};
use tracing::info;

mod batch;
mod extract;
mod init;
mod render;
mod scrape;
mod version;

pub use batch::{BatchInput, BatchStrategy};
pub use extract::{ExtractInput, ExtractStrategy};
pub use init::InitStrategy;
pub use render::{RenderInput, RenderStrategy};
pub use scrape::{ScrapeInput, ScrapeStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Design Principles
/// - **Static dispatch**: All calls are monomorphized at compile time
/// - **Type safety**: Each strategy defines its own input type via associated type
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
struct Overrides {
    max_depth: Option<usize>,
    include_memory_payloads: bool,
}

fn apply_overrides(mut config: Config, overrides: Overrides) -> Config {
    if let Some(max_depth) = overrides.max_depth {
        config.walker.max_depth = max_depth;
    }
    if overrides.include_memory_payloads {
        config.extraction.include_memory_payloads = true;
    }
    config
}

/// Load the config, apply overrides and compile the engine.
fn build_engine(
    config_path: Option<&Path>,
    overrides: Overrides,
) -> anyhow::Result<(Config, ExtractionEngine)> {
    let config = apply_overrides(Config::load(config_path)?, overrides);
    let engine = ExtractionEngine::new(config.walker, config.extraction.clone())?;
    info!(
        "Engine ready: {} patterns, max depth {}",
        engine.registry().len(),
        config.walker.max_depth
    );
    Ok((config, engine))
}

/// Print `content` to stdout, or write it to `output` creating parent directories.
fn write_output(content: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .map_err(|e| anyhow::anyhow!("Cannot write {}: {e}", path.display()))?;
            info!("Output written to: {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn log_summary(collection: &MemoryCollection) {
    for category in memsift_core::Category::ALL {
        info!(
            "{}: {} entries",
            category.heading(),
            collection.category(category).len()
        );
    }
    info!("Total unique entries: {}", collection.len());
}
