//! Error types for the minter

use thiserror::Error;

/// Result type alias
pub type MinterResult<T> = std::result::Result<T, MinterError>;

/// Fatal errors that abort a run
#[derive(Debug, Error)]
pub enum MinterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    /// Row has fewer columns than the address column requires
    #[error("Malformed row {row}: expected at least {expected} columns, found {columns}")]
    MalformedRow {
        row: u64,
        expected: usize,
        columns: usize,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Profile '{0}' not found in Aptos CLI config")]
    MissingProfile(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
