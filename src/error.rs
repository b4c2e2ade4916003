//! Error types for alert decoding

use thiserror::Error;

/// Errors that can occur while building or decoding a message payload
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to parse the MIME structure
    #[error("Failed to parse message structure: {0}")]
    Structure(String),

    /// Failed to decode a transfer-encoded body blob
    #[error("Failed to decode content: {0}")]
    Decode(String),

    /// Message resource was not valid JSON
    #[error("Invalid message resource: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),
}

/// Result type for payload operations
pub type Result<T> = std::result::Result<T, ExtractError>;
