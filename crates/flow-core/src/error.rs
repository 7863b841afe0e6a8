use std::path::PathBuf;

use thiserror::Error;

use flow_model::Collection;
use flow_split::SaleIssue;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Rejected state transitions. The state is left unchanged when one is returned.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("{collection} already contains id {id}")]
    DuplicateId { collection: Collection, id: String },

    #[error("{collection} has no record with id {id}")]
    UnknownId { collection: Collection, id: String },

    #[error("sale {id} is invalid: {issue}")]
    InvalidSale {
        id: String,
        #[source]
        issue: SaleIssue,
    },

    #[error("sale {id} is already paid")]
    AlreadyPaid { id: String },

    #[error("amount must be a positive number, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("transfer {id} is invalid: {reason}")]
    InvalidTransfer { id: String, reason: &'static str },

    #[error("not enough stock of {product}: {available} available, {requested} requested")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    #[error("vault {vault} holds {available:.2}, cannot transfer {amount:.2}")]
    InsufficientFunds {
        vault: String,
        available: f64,
        amount: f64,
    },
}

pub type Result<T> = std::result::Result<T, StateError>;
