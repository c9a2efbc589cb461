//! Integration tests for usgs-client against a local HTTP fixture.
//!
//! Run the live test against the real service with:
//!   cargo test -p usgs-client --test client_tests -- --ignored

use chrono::{TimeZone, Utc};
use quake_core::{EventQuery, EventSource, FetchError, GeoPoint};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use usgs_client::{UsgsClient, UsgsConfig, UsgsError};

const PAYLOAD: &str = r#"{
    "type": "FeatureCollection",
    "metadata": {"count": 2, "status": 200},
    "features": [
        {
            "type": "Feature",
            "properties": {"mag": 5.0, "place": "near Almaty", "time": 1717243200000},
            "geometry": {"type": "Point", "coordinates": [77.0, 44.0, 10.0]},
            "id": "first"
        },
        {
            "type": "Feature",
            "properties": {"mag": 4.1, "place": "Tien Shan", "time": 1717243100000},
            "geometry": {"type": "Point", "coordinates": [78.5, 42.1, 15.0]},
            "id": "second"
        }
    ]
}"#;

/// Serve a single HTTP response and return the request line that was received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{}/fdsnws/event/1/query", addr), handle)
}

fn query() -> EventQuery {
    EventQuery {
        start: Utc.with_ymd_and_hms(2024, 6, 1, 11, 50, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        min_magnitude: 4,
        center: GeoPoint::new(43.25, 76.9).unwrap(),
        max_radius_km: 800.0,
    }
}

#[tokio::test]
async fn test_fetch_events_in_payload_order() {
    let (base_url, server) = serve_once("200 OK", PAYLOAD).await;
    let client = UsgsClient::new(UsgsConfig::new(base_url)).unwrap();

    let events = client.fetch(&query()).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "first");
    assert_eq!(events[0].point.lat(), 44.0);
    assert_eq!(events[0].point.lon(), 77.0);
    assert_eq!(events[1].id, "second");

    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /fdsnws/event/1/query?format=geojson&minmag=4"));
    assert!(request_line.contains("latitude=43.25&longitude=76.90&maxradiuskm=800.0"));
}

#[tokio::test]
async fn test_non_success_status() {
    let (base_url, server) = serve_once("503 Service Unavailable", "down for maintenance").await;
    let client = UsgsClient::new(UsgsConfig::new(base_url)).unwrap();

    let err = client.query(&query()).await.unwrap_err();
    match err {
        UsgsError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "down for maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_payload_is_fetch_error() {
    let (base_url, server) = serve_once("200 OK", "<html>not json</html>").await;
    let client = UsgsClient::new(UsgsConfig::new(base_url)).unwrap();

    let err = client.fetch(&query()).await.unwrap_err();
    assert!(matches!(err, FetchError::Payload(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = UsgsClient::new(UsgsConfig::new(format!("http://{}/query", addr))).unwrap();
    let err = client.fetch(&query()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_query() {
    let client = UsgsClient::new(UsgsConfig::default()).unwrap();
    let now = Utc::now();
    let query = EventQuery {
        start: now - chrono::TimeDelta::days(1),
        end: now,
        min_magnitude: 2,
        center: GeoPoint::new(43.25, 76.9).unwrap(),
        max_radius_km: 2000.0,
    };
    let collection = client.query(&query).await.unwrap();
    assert_eq!(collection.metadata.count, collection.features.len());
}
