//! The fixed monitoring target.

use chrono::TimeDelta;
use chrono_tz::Tz;

use crate::error::ConfigError;
use crate::geo::GeoPoint;

/// Time zone used for alert timestamps unless configured otherwise.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Almaty;

/// The monitoring point and its alerting thresholds.
///
/// Built once at startup and shared read-only for the lifetime of the
/// process. Changing any value requires a restart.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetConfig {
    point: GeoPoint,
    name: String,
    max_radius_km: f64,
    min_magnitude: i32,
    lookback_minutes: u32,
    timezone: Tz,
}

impl TargetConfig {
    /// Create a target, validating the radius and lookback window.
    pub fn new(
        point: GeoPoint,
        name: impl Into<String>,
        max_radius_km: f64,
        min_magnitude: i32,
        lookback_minutes: u32,
    ) -> Result<Self, ConfigError> {
        if !max_radius_km.is_finite() || max_radius_km < 0.0 {
            return Err(ConfigError::invalid(
                "max_radius_km",
                format!("must be a non-negative number, got {}", max_radius_km),
            ));
        }
        if lookback_minutes == 0 {
            return Err(ConfigError::invalid(
                "lookback_minutes",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            point,
            name: name.into(),
            max_radius_km,
            min_magnitude,
            lookback_minutes,
            timezone: DEFAULT_TIMEZONE,
        })
    }

    /// Builder method to set the display time zone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    /// Human-readable name used in alerts.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_radius_km(&self) -> f64 {
        self.max_radius_km
    }

    pub fn min_magnitude(&self) -> i32 {
        self.min_magnitude
    }

    pub fn lookback_minutes(&self) -> u32 {
        self.lookback_minutes
    }

    /// The lookback window queried on every cycle.
    pub fn lookback(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.lookback_minutes))
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}
