//! Error types for the Study Player client.

use study_core::StudyError;
use thiserror::Error;

/// Errors that can occur when talking to the study backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but missing or rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Request understood but refused (e.g. trial limit reached)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Rate limited by server
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Settings could not be loaded or are invalid
    #[error("Settings error: {0}")]
    Settings(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for StudyError {
    fn from(err: ClientError) -> Self {
        StudyError::provider(err.to_string())
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Settings(err.to_string())
    }
}
