//! Core types and traits for the quake alert relay.
//!
//! This crate holds everything the polling cycle needs that does not touch
//! the network:
//!
//! - [`GeoPoint`], [`TargetConfig`], [`SeismicEvent`] - the data model
//! - [`distance_km`], [`evaluate`], [`format_alert`] - the proximity evaluator
//! - [`EventSource`] / [`Notifier`] / [`Clock`] - collaborator seams
//! - [`FetchError`], [`NotifyError`], [`ConfigError`] - error types
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use quake_core::{evaluate, format_alert, GeoPoint, SeismicEvent, TargetConfig};
//!
//! let almaty = GeoPoint::new(43.25, 76.9).unwrap();
//! let target = TargetConfig::new(almaty, "Almaty", 800.0, 4, 10).unwrap();
//!
//! let epicenter = GeoPoint::new(44.0, 77.0).unwrap();
//! let event = SeismicEvent::new("us7000abcd", epicenter, 5.0, "Kazakhstan", Utc::now());
//!
//! let result = evaluate(&target, &event);
//! if result.in_range {
//!     println!("{}", format_alert(&target, &event, result.distance_km));
//! }
//! ```

mod error;
mod event;
mod geo;
mod proximity;
mod target;
mod traits;

pub use error::{ConfigError, CoordinateError, FetchError, MalformedEventError, NotifyError};
pub use event::{EventQuery, SeismicEvent};
pub use geo::GeoPoint;
pub use proximity::{distance_km, evaluate, format_alert, EvaluationResult, EARTH_RADIUS_KM};
pub use target::{TargetConfig, DEFAULT_TIMEZONE};
pub use traits::{Clock, EventSource, FixedClock, Notifier, SystemClock};

// Re-export for implementors
pub use async_trait::async_trait;
pub use chrono_tz::Tz;
