//! Error types for telegram-bot.

use quake_core::NotifyError;
use thiserror::Error;

/// Errors that can occur when talking to the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with `ok: false`.
    #[error("API error {code}: {description}")]
    Api { code: i32, description: String },

    /// Non-success status without a Bot API error body.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<TelegramError> for NotifyError {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::Api { code, description } => NotifyError::Rejected { code, description },
            other => NotifyError::Transport(other.to_string()),
        }
    }
}
