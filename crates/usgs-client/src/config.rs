//! Configuration types for usgs-client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use quake_core::EventQuery;
use reqwest::Url;

use crate::error::UsgsError;

/// Default FDSN event query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// ISO-8601 without offset; the service reads it as UTC.
const ISO_8601: &str = "%Y-%m-%dT%H:%M:%S";

/// Configuration for the event service client.
#[derive(Debug, Clone)]
pub struct UsgsConfig {
    /// Query endpoint URL.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl UsgsConfig {
    /// Create a new configuration with the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the full request URL for a query.
    pub fn query_url(&self, query: &EventQuery) -> Result<Url, UsgsError> {
        Url::parse_with_params(&self.base_url, query_params(query))
            .map_err(|e| UsgsError::Config(format!("invalid base URL {}: {}", self.base_url, e)))
    }
}

impl Default for UsgsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Query string parameters for an event query.
pub fn query_params(query: &EventQuery) -> Vec<(&'static str, String)> {
    vec![
        ("format", "geojson".to_string()),
        ("minmag", query.min_magnitude.to_string()),
        ("starttime", format_time(query.start)),
        ("endtime", format_time(query.end)),
        ("latitude", format!("{:.2}", query.center.lat())),
        ("longitude", format!("{:.2}", query.center.lon())),
        ("maxradiuskm", format!("{:.1}", query.max_radius_km)),
    ]
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format(ISO_8601).to_string()
}
