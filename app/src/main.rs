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

mod command;

use clap::{Parser, Subcommand};
use command::{
    BatchInput, BatchStrategy, CommandStrategy, ExtractInput, ExtractStrategy, InitStrategy,
    RenderInput, RenderStrategy, ScrapeInput, ScrapeStrategy, VersionStrategy,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "memsift")]
#[command(about = "Extract memory entries from chat export JSON", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/memsift/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract marked memory entries from export files
    Extract {
        /// Files or directories to read
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short = 'f', long)]
        format: Option<String>,

        /// Deepest nesting level searched (root is 0)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Copy raw memory payloads into the field bag
        #[arg(long)]
        include_memory_payloads: bool,
    },
    /// Write one fragment document per JSON file in a directory
    Batch {
        input_dir: PathBuf,
        output_dir: Option<PathBuf>,
    },
    /// Scrape profile fields from a file or directory tree
    Scrape {
        path: PathBuf,
        output_file: Option<PathBuf>,
    },
    /// Turn a json aggregate into "Remember that ..." phrases
    Render {
        input: PathBuf,

        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = cli.config;

    match cli.command {
        Commands::Extract {
            paths,
            output,
            format,
            max_depth,
            include_memory_payloads,
        } => {
            ExtractStrategy
                .execute(ExtractInput {
                    config,
                    paths,
                    output,
                    format,
                    max_depth,
                    include_memory_payloads,
                })
                .await?;
        }
        Commands::Batch {
            input_dir,
            output_dir,
        } => {
            BatchStrategy
                .execute(BatchInput {
                    config,
                    input_dir,
                    output_dir,
                })
                .await?;
        }
        Commands::Scrape { path, output_file } => {
            ScrapeStrategy
                .execute(ScrapeInput {
                    config,
                    path,
                    output_file,
                })
                .await?;
        }
        Commands::Render { input, output } => {
            RenderStrategy.execute(RenderInput { input, output }).await?;
        }
        Commands::Init => {
            InitStrategy.execute(()).await?;
        }
        Commands::Version => {
            VersionStrategy.execute(()).await?;
        }
    }

    Ok(())
}
