//! Proximity evaluation: great-circle distance, radius check and alert text.

use crate::event::SeismicEvent;
use crate::geo::GeoPoint;
use crate::target::TargetConfig;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Format used for event timestamps in alerts.
const ALERT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Great-circle distance between two points using the Haversine formula.
///
/// Symmetric, zero for identical points and never negative.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (phi1, phi2) = (a.lat().to_radians(), b.lat().to_radians());
    let (delta_phi, delta_lambda) = (
        (b.lat() - a.lat()).to_radians(),
        (b.lon() - a.lon()).to_radians(),
    );
    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Outcome of checking one event against the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationResult {
    pub distance_km: f64,
    pub in_range: bool,
}

/// Compute the event's distance from the target and whether it is in range.
///
/// The radius bound is inclusive.
pub fn evaluate(target: &TargetConfig, event: &SeismicEvent) -> EvaluationResult {
    let distance_km = distance_km(target.point(), event.point);
    EvaluationResult {
        distance_km,
        in_range: distance_km <= target.max_radius_km(),
    }
}

/// Render one alert block for an in-range event.
pub fn format_alert(target: &TargetConfig, event: &SeismicEvent, distance_km: f64) -> String {
    let local_time = event.time.with_timezone(&target.timezone());

    let mut lines = vec![
        "🌍 Earthquake Alert! 🌍".to_string(),
        String::new(),
        format!("📍 Location: {}", event.place),
        format!("📏 Magnitude: {:.1}", event.magnitude),
        format!("🕒 Time: {}", local_time.format(ALERT_TIME_FORMAT)),
    ];

    if let Some(depth) = event.depth_km {
        lines.push(format!("⬇️ Depth: {:.1} km", depth));
    }

    lines.push(format!(
        "📐 Distance: {:.2} km from {}",
        distance_km,
        target.name()
    ));

    if let Some(ref url) = event.url {
        lines.push(format!("🔗 Details: {}", url));
    }

    lines.push(String::new());
    lines.push("Stay safe, everyone! 🚨".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn target(max_radius_km: f64) -> TargetConfig {
        TargetConfig::new(point(43.25, 76.9), "Almaty", max_radius_km, 4, 10).unwrap()
    }

    fn event_at(lat: f64, lon: f64) -> SeismicEvent {
        SeismicEvent::new(
            "us7000test",
            point(lat, lon),
            5.0,
            "45 km NE of Almaty, Kazakhstan",
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        for p in [point(43.25, 76.9), point(-33.9, 151.2), point(90.0, 0.0)] {
            assert_eq!(distance_km(p, p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (point(43.25, 76.9), point(44.0, 77.0)),
            (point(35.68, 139.69), point(-33.87, 151.21)),
            (point(0.0, 179.9), point(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance_km(a, b), distance_km(b, a));
        }
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_km(point(43.25, 76.9), point(44.25, 76.9));
        assert!((d - 111.0).abs() <= 1.0, "got {}", d);
    }

    #[test]
    fn test_distance_grows_with_separation() {
        let origin = point(43.25, 76.9);
        let near = distance_km(origin, point(44.0, 76.9));
        let far = distance_km(origin, point(46.0, 76.9));
        assert!(near < far);
    }

    #[test]
    fn test_antipodal_distance_is_finite() {
        let d = distance_km(point(0.0, 0.0), point(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_evaluate_in_range() {
        let result = evaluate(&target(800.0), &event_at(44.0, 77.0));
        assert!(result.in_range);
        assert!((result.distance_km - 84.0).abs() < 2.0, "got {}", result.distance_km);
    }

    #[test]
    fn test_evaluate_at_exact_radius_is_in_range() {
        let event = event_at(44.0, 77.0);
        let exact = distance_km(point(43.25, 76.9), event.point);
        let result = evaluate(&target(exact), &event);
        assert!(result.in_range);
        assert_eq!(result.distance_km, exact);
    }

    #[test]
    fn test_evaluate_just_outside_radius() {
        let event = event_at(44.0, 77.0);
        let exact = distance_km(point(43.25, 76.9), event.point);
        let result = evaluate(&target(exact - 1e-6), &event);
        assert!(!result.in_range);
    }

    #[test]
    fn test_format_alert_contents() {
        let target = target(800.0).with_timezone(chrono_tz::UTC);
        let alert = format_alert(&target, &event_at(44.0, 77.0), 83.76);

        assert!(alert.contains("Location: 45 km NE of Almaty, Kazakhstan"));
        assert!(alert.contains("Magnitude: 5.0"));
        assert!(alert.contains("Time: 2024-06-01 12:00:00 UTC"));
        assert!(alert.contains("Distance: 83.76 km from Almaty"));
        assert!(!alert.contains("Depth"));
        assert!(!alert.contains("Details"));
    }

    #[test]
    fn test_format_alert_uses_target_timezone() {
        let target = target(800.0).with_timezone(chrono_tz::Asia::Tokyo);
        let alert = format_alert(&target, &event_at(44.0, 77.0), 10.0);
        assert!(alert.contains("Time: 2024-06-01 21:00:00 JST"), "{}", alert);
    }

    #[test]
    fn test_format_alert_optional_lines() {
        let event = event_at(44.0, 77.0)
            .with_depth_km(10.5)
            .with_url("https://earthquake.usgs.gov/earthquakes/eventpage/us7000test");
        let alert = format_alert(&target(800.0), &event, 10.0);

        assert!(alert.contains("Depth: 10.5 km"));
        assert!(alert.contains("Details: https://earthquake.usgs.gov/earthquakes/eventpage/us7000test"));
    }
}
