//! Error types for usgs-client.

use quake_core::FetchError;
use thiserror::Error;

/// Errors that can occur when querying the event service.
#[derive(Debug, Error)]
pub enum UsgsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<UsgsError> for FetchError {
    fn from(err: UsgsError) -> Self {
        match err {
            UsgsError::Http(e) => FetchError::Transport(e.to_string()),
            UsgsError::Json(e) => FetchError::Payload(e.to_string()),
            UsgsError::Status { status, body } => FetchError::Status { status, body },
            UsgsError::Config(msg) => FetchError::Transport(msg),
        }
    }
}
