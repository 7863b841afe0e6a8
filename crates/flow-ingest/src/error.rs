use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} must contain a JSON array of documents")]
    NotAnArray { path: PathBuf },

    #[error("unsupported snapshot format: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },

    #[error("cannot tell which collection {path} holds")]
    UnknownCollection { path: PathBuf },

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
}

impl IngestError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
