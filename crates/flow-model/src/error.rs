use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
    #[error("unknown sale status: {0}")]
    UnknownStatus(String),
    #[error("unknown ledger entry kind: {0}")]
    UnknownEntryKind(String),
    #[error("invalid field filter `{0}` (expected FIELD=VALUE)")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
