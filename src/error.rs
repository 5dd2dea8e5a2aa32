use std::path::PathBuf;

use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}

/// Failures while reading, writing, or exporting a persisted history.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read history from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse history at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode history for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to export CSV to {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Failures while retrieving a quote from the upstream price API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response has no `{currency}` quote for `{id}`")]
    MissingQuote { id: String, currency: String },
    #[error("received invalid price {price} for `{id}`")]
    InvalidPrice { id: String, price: f64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("symbol must not be empty")]
    Empty,
    #[error("symbol `{symbol}` contains invalid character {ch:?}")]
    InvalidCharacter { symbol: String, ch: char },
}
