//! Error taxonomy for input resolution and document extraction.
//!
//! Every variant except [`Error::NoInputs`] is recoverable at the batch
//! level: the offending input is reported and the run continues.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Malformed JSON document {}: {source}", path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported document shape in {}: top-level value is {kind}", path.display())]
    UnsupportedShape { path: PathBuf, kind: &'static str },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No inputs resolved")]
    NoInputs,

    #[error("Invalid pattern '{id}': {reason}")]
    InvalidPattern { id: String, reason: String },
}

impl Error {
    /// Path of the input this error belongs to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::InputNotFound { path }
            | Self::MalformedDocument { path, .. }
            | Self::UnsupportedShape { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::NoInputs | Self::InvalidPattern { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_document_names_file_and_cause() {
        let source = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err = Error::MalformedDocument {
            path: PathBuf::from("broken.json"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("broken.json"));
        assert!(msg.contains("key must be a string"));
        assert_eq!(err.path(), Some(std::path::Path::new("broken.json")));
    }

    #[test]
    fn no_inputs_has_no_path() {
        assert!(Error::NoInputs.path().is_none());
    }
}
