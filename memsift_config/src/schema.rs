use memsift_core::{ExtractionConfig, OutputFormat, WalkerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub walker: WalkerConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Used by `batch` when no output directory is given.
    #[serde(default = "BatchConfig::default_output_dir")]
    pub output_dir: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
        }
    }
}

impl BatchConfig {
    fn default_output_dir() -> String {
        "output".to_string()
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "walker": {
    "max_depth": 10
  },
  "extraction": {
    "min_capture_len": 4,
    "denylist": ["content", "parts"],
    "metadata_memory": true,
    "include_memory_payloads": false,
    "extra_patterns": []
  },
  "output": {
    "format": "text"
  },
  "batch": {
    "output_dir": "output"
  }
}
"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("memsift"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load from `path`, or from `~/memsift/config.json` when `None`.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found at: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let Ok(default) = Self::default_path() else {
                    debug!("No home directory, using default config");
                    return Ok(Self::default());
                };
                if !default.exists() {
                    debug!("No config at {}, using defaults", default.display());
                    return Ok(Self::default());
                }
                default
            }
        };

        Self::read(&config_path)
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Write the default template to `path`. Never overwrites.
    pub fn create_config_at(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join("config.json");
        Self::create_config_at(&config_path)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Configuration options:");
        println!("   - walker.max_depth: deepest nesting level searched (root is 0)");
        println!("   - extraction.extra_patterns: additional marker patterns");
        println!("   - extraction.include_memory_payloads: copy raw memory payloads");
        println!("   - output.format: text or json");
        println!();
        Ok(config_path)
    }
}
