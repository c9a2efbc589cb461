//! USGS earthquake event service client.
//!
//! This crate queries the FDSN event endpoint for events inside a radius and
//! time window and converts the GeoJSON response into
//! [`quake_core::SeismicEvent`] values. [`UsgsClient`] implements
//! [`quake_core::EventSource`].
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use quake_core::{EventQuery, GeoPoint, TargetConfig};
//! use usgs_client::{UsgsClient, UsgsConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = UsgsClient::new(UsgsConfig::default())?;
//!
//! let target = TargetConfig::new(GeoPoint::new(43.25, 76.9)?, "Almaty", 800.0, 4, 10)?;
//! let query = EventQuery::for_window(&target, Utc::now());
//!
//! for event in client.fetch_events(&query).await? {
//!     println!("M{:.1} {}", event.magnitude, event.place);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::UsgsClient;
pub use config::{query_params, UsgsConfig, DEFAULT_BASE_URL};
pub use error::UsgsError;
pub use types::{Feature, FeatureCollection, Geometry, Metadata, Properties};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
