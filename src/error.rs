// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnrichmentError>;

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("No company records could be processed")]
    EmptyBatch,
}

impl From<serde_json::Error> for EnrichmentError {
    fn from(err: serde_json::Error) -> Self {
        EnrichmentError::Serialization(err.to_string())
    }
}
