//! Error types shared by the relay and its collaborators.

use thiserror::Error;

/// A latitude/longitude pair outside the valid range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// Errors raised while building configuration at startup.
///
/// All of these are fatal: the process must not start polling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A value was present but could not be used.
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },

    /// The target point is not a valid coordinate.
    #[error("Invalid target coordinate: {0}")]
    Coordinate(#[from] CoordinateError),
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::Invalid`] value.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors reported by an event source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The source answered with a non-success status.
    #[error("event source returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be understood.
    #[error("malformed payload: {0}")]
    Payload(String),
}

/// Errors reported by a notification channel.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The channel refused the message.
    #[error("delivery rejected ({code}): {description}")]
    Rejected { code: i32, description: String },
}

/// A single reported event that cannot be evaluated.
///
/// Only that event is skipped; the rest of the cycle continues.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed event {id}: {reason}")]
pub struct MalformedEventError {
    pub id: String,
    pub reason: String,
}

impl MalformedEventError {
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
