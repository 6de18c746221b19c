//! Error types for mashup

use thiserror::Error;

/// Main error type for mashup operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Server not configured: {0}")]
    UnconfiguredServer(String),

    #[error("Unsupported query shape: {0} space-separated tokens (at most 4 are supported)")]
    UnsupportedQueryShape(usize),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for mashup operations
pub type Result<T> = std::result::Result<T, Error>;
