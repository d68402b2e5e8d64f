//! Input path resolution.
//!
//! Paths that do not exist are reported and skipped; directories expand to
//! the `*.json` files directly inside them, or below them when `recursive`.

use memsift_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Files to process plus the inputs that could not be resolved.
#[derive(Debug, Default)]
pub struct ResolvedInputs {
    pub files: Vec<PathBuf>,
    pub errors: Vec<Error>,
}

/// JSON files in `dir`, sorted by path.
///
/// # Errors
/// Returns [`Error::Io`] if the directory cannot be listed.
pub fn json_files_in(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = if recursive {
        format!("{escaped}/**/*.json")
    } else {
        format!("{escaped}/*.json")
    };

    let paths = glob::glob(&pattern).map_err(|e| Error::Io {
        path: dir.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(Error::Io {
                    path,
                    source: e.into(),
                });
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Expand command-line paths into input files.
#[must_use]
pub fn resolve_inputs(paths: &[PathBuf], recursive: bool) -> ResolvedInputs {
    let mut resolved = ResolvedInputs::default();

    for path in paths {
        if !path.exists() {
            warn!("File not found: {}", path.display());
            resolved.errors.push(Error::InputNotFound { path: path.clone() });
        } else if path.is_dir() {
            match json_files_in(path, recursive) {
                Ok(files) => {
                    if files.is_empty() {
                        warn!("No JSON files found in {}", path.display());
                    }
                    resolved.files.extend(files);
                }
                Err(e) => {
                    warn!("{e}");
                    resolved.errors.push(e);
                }
            }
        } else {
            resolved.files.push(path.clone());
        }
    }

    resolved
}
