//! Seismic event and query types.

use chrono::{DateTime, Utc};

use crate::geo::GeoPoint;
use crate::target::TargetConfig;

/// One reported seismic event.
///
/// Events live for a single cycle: they are fetched, evaluated and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicEvent {
    /// Opaque identifier assigned by the source.
    pub id: String,
    /// Epicenter.
    pub point: GeoPoint,
    pub magnitude: f64,
    /// Free-text place description, e.g. "45 km SW of Almaty, Kazakhstan".
    pub place: String,
    /// Occurrence instant.
    pub time: DateTime<Utc>,
    /// Hypocenter depth in kilometers, when reported.
    pub depth_km: Option<f64>,
    /// Link to the event page, when reported.
    pub url: Option<String>,
}

impl SeismicEvent {
    /// Create an event with the required fields.
    pub fn new(
        id: impl Into<String>,
        point: GeoPoint,
        magnitude: f64,
        place: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            point,
            magnitude,
            place: place.into(),
            time,
            depth_km: None,
            url: None,
        }
    }

    /// Builder method to set the depth.
    pub fn with_depth_km(mut self, depth_km: f64) -> Self {
        self.depth_km = Some(depth_km);
        self
    }

    /// Builder method to set the detail URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Parameters for one fetch from an event source.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub min_magnitude: i32,
    pub center: GeoPoint,
    pub max_radius_km: f64,
}

impl EventQuery {
    /// Build the query for the window ending at `now`.
    pub fn for_window(target: &TargetConfig, now: DateTime<Utc>) -> Self {
        Self {
            start: now - target.lookback(),
            end: now,
            min_magnitude: target.min_magnitude(),
            center: target.point(),
            max_radius_km: target.max_radius_km(),
        }
    }
}
