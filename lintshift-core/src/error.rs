use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LintshiftError {
    #[error("Failed to parse JSON in {path:?}: {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid manifest in {path:?}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Failed to serialize manifest {path:?}: {source}")]
    SerializeJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}
