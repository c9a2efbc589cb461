//! Integration tests for telegram-bot against a local Bot API fixture.

use quake_core::{Notifier, NotifyError};
use telegram_bot::{BotConfig, TelegramClient, TelegramError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const GET_ME_OK: &str = r#"{"ok": true, "result": {"id": 7001, "is_bot": true,
    "first_name": "Quake Relay", "username": "quake_relay_bot"}}"#;

const SEND_OK: &str = r#"{"ok": true, "result": {"message_id": 42, "date": 1717243200,
    "chat": {"id": -1001234567890, "type": "channel", "title": "Quakes"}}}"#;

/// A request captured by the fixture.
#[derive(Debug)]
struct Captured {
    request_line: String,
    body: String,
}

async fn read_request(socket: &mut TcpStream) -> Captured {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut buf).await.unwrap();
        assert!(n > 0, "connection closed before headers");
        data.extend_from_slice(&buf[..n]);
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = socket.read(&mut buf).await.unwrap();
        assert!(n > 0, "connection closed before body");
        data.extend_from_slice(&buf[..n]);
    }

    Captured {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&data[header_end..header_end + content_length]).to_string(),
    }
}

/// Serve one connection per response, in order.
async fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            captured.push(read_request(&mut socket).await);

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
        captured
    });

    (format!("http://{}", addr), handle)
}

fn config(api_url: &str) -> BotConfig {
    BotConfig::new("7001:test-token", "@quakes").with_api_url(api_url)
}

#[tokio::test]
async fn test_connect_and_notify() {
    let (api_url, server) = serve(vec![("200 OK", GET_ME_OK), ("200 OK", SEND_OK)]).await;

    let client = TelegramClient::connect(config(&api_url)).await.unwrap();
    assert_eq!(client.me().username.as_deref(), Some("quake_relay_bot"));

    client.notify("🌍 Earthquake Alert! 🌍").await.unwrap();

    let captured = server.await.unwrap();
    assert_eq!(captured.len(), 2);
    assert!(captured[0].request_line.starts_with("POST /bot7001:test-token/getMe "));
    assert!(captured[1].request_line.starts_with("POST /bot7001:test-token/sendMessage "));

    let body: serde_json::Value = serde_json::from_str(&captured[1].body).unwrap();
    assert_eq!(body["chat_id"], "@quakes");
    assert_eq!(body["text"], "🌍 Earthquake Alert! 🌍");
    assert_eq!(body["disable_web_page_preview"], true);
}

#[tokio::test]
async fn test_invalid_token() {
    let (api_url, server) = serve(vec![(
        "401 Unauthorized",
        r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#,
    )])
    .await;

    let err = TelegramClient::connect(config(&api_url)).await.unwrap_err();
    assert!(matches!(err, TelegramError::Api { code: 401, .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn test_rejected_message() {
    let (api_url, server) = serve(vec![
        ("200 OK", GET_ME_OK),
        (
            "400 Bad Request",
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
        ),
    ])
    .await;

    let client = TelegramClient::connect(config(&api_url)).await.unwrap();
    let err = client.notify("hello").await.unwrap_err();
    match err {
        NotifyError::Rejected { code, description } => {
            assert_eq!(code, 400);
            assert!(description.contains("chat not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_gateway_error_without_api_body() {
    let (api_url, server) = serve(vec![
        ("200 OK", GET_ME_OK),
        ("502 Bad Gateway", "<html>bad gateway</html>"),
    ])
    .await;

    let client = TelegramClient::connect(config(&api_url)).await.unwrap();
    let err = client.send_message("hello").await.unwrap_err();
    assert!(matches!(err, TelegramError::Connection(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_transport_error_hides_token() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = TelegramClient::connect(config(&format!("http://{}", addr)))
        .await
        .unwrap_err();
    assert!(matches!(err, TelegramError::Http(_)));
    assert!(!err.to_string().contains("test-token"));
}
