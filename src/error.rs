use std::path::PathBuf;
use thiserror::Error;

/// The main error type for yolobalance operations.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory not found: {path}")]
    InputDirNotFound { path: PathBuf },

    #[error("Failed to parse class table from {path}: {source}")]
    ClassTableParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid class table in {path}: {message}")]
    ClassTableInvalid { path: PathBuf, message: String },

    #[error("Failed to parse sampling targets from {path}: {source}")]
    TargetsParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid sampling targets in {path}: {message}")]
    TargetsInvalid { path: PathBuf, message: String },

    #[error("Failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed while traversing {path}: {message}")]
    DirTraversal { path: PathBuf, message: String },
}
