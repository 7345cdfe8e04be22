//! Error types for schema-report

use thiserror::Error;

/// Core error type for schema-report operations
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for schema-report operations
pub type Result<T> = std::result::Result<T, ReportError>;
