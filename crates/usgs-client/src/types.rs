//! GeoJSON payload types returned by the event service.

use chrono::DateTime;
use quake_core::{GeoPoint, MalformedEventError, SeismicEvent};
use serde::Deserialize;
use tracing::warn;

/// Place text used when the service omits one.
const UNKNOWN_PLACE: &str = "Unknown location";

/// Top-level `FeatureCollection`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Collection metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub generated: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub count: usize,
}

/// One event feature.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Event properties. Only the fields the relay uses are modeled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Occurrence time, epoch milliseconds.
    pub time: Option<i64>,
    pub url: Option<String>,
    pub mag_type: Option<String>,
    pub title: Option<String>,
}

/// Point geometry; `coordinates` is `[longitude, latitude, depth]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Feature {
    /// Convert this feature into a [`SeismicEvent`].
    pub fn to_event(&self) -> Result<SeismicEvent, MalformedEventError> {
        let malformed = |reason: &str| MalformedEventError::new(&self.id, reason);

        let coordinates = self
            .geometry
            .as_ref()
            .map(|g| g.coordinates.as_slice())
            .unwrap_or_default();
        let (lon, lat) = match coordinates {
            [lon, lat, ..] => (*lon, *lat),
            _ => return Err(malformed("missing coordinates")),
        };
        let point = GeoPoint::from_lon_lat(lon, lat)
            .map_err(|e| malformed(&e.to_string()))?;

        let magnitude = self.properties.mag.ok_or_else(|| malformed("missing magnitude"))?;
        let millis = self.properties.time.ok_or_else(|| malformed("missing time"))?;
        let time = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| malformed("time out of range"))?;

        let place = self
            .properties
            .place
            .clone()
            .or_else(|| self.properties.title.clone())
            .unwrap_or_else(|| UNKNOWN_PLACE.to_string());

        let mut event = SeismicEvent::new(&self.id, point, magnitude, place, time);
        if let Some(depth) = coordinates.get(2) {
            event = event.with_depth_km(*depth);
        }
        if let Some(ref url) = self.properties.url {
            event = event.with_url(url);
        }
        Ok(event)
    }
}

impl FeatureCollection {
    /// Convert all well-formed features into events, in payload order.
    ///
    /// Malformed features are logged and skipped.
    pub fn into_events(self) -> Vec<SeismicEvent> {
        self.features
            .iter()
            .filter_map(|feature| match feature.to_event() {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!("Skipping event: {}", e);
                    None
                }
            })
            .collect()
    }
}
