//! Presence observers over WebSocket
//!
//! Run with: cargo test -p integration-tests --test realtime_tests

use std::time::Duration;

use futures_util::StreamExt;
use integration_tests::{assert_json, fixtures::*, TestServer};
use reqwest::StatusCode;
use tokio_tungstenite::{connect_async, tungstenite::Message};

async fn signup(server: &TestServer, name: &str) -> AuthResponse {
    let response = server
        .post("/signup", &SignupRequest::named(name))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Next text frame that is a presence update, parsed
async fn next_presence_update<S>(stream: &mut S) -> serde_json::Value
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("timed out waiting for presence update")
            .expect("stream closed")
            .expect("websocket error");

        if let Message::Text(text) = frame {
            let event: serde_json::Value = serde_json::from_str(&text).unwrap();
            if event["type"] == "PRESENCE_UPDATE" {
                return event;
            }
        }
    }
}

#[tokio::test]
async fn test_observer_receives_presence_update() {
    let server = TestServer::start().await.unwrap();
    let alice = signup(&server, "Alice").await;
    let bob = signup(&server, "Bob").await;

    let (mut ws, _) = connect_async(server.ws_url("/presence/ws", &bob.access_token))
        .await
        .unwrap();

    server.post_auth("/status", &alice.access_token).await.unwrap();

    let event = next_presence_update(&mut ws).await;
    assert_eq!(event["user_id"], alice.user.id.as_str());
    assert_eq!(event["name"], "Alice");
    assert_eq!(event["status"], "busy");
    assert_eq!(event["busy"], true);
}

#[tokio::test]
async fn test_observer_sees_toggles_in_order() {
    let server = TestServer::start().await.unwrap();
    let alice = signup(&server, "Alice").await;

    let (mut ws, _) = connect_async(server.ws_url("/presence/ws", &alice.access_token))
        .await
        .unwrap();

    server.post_auth("/status", &alice.access_token).await.unwrap();
    server.post_auth("/status", &alice.access_token).await.unwrap();

    assert_eq!(next_presence_update(&mut ws).await["status"], "busy");
    assert_eq!(next_presence_update(&mut ws).await["status"], "available");
}

#[tokio::test]
async fn test_broadcast_disabled_sends_nothing() {
    let server = TestServer::start_with(&[("PRESENCE_BROADCAST", "false")])
        .await
        .unwrap();
    let alice = signup(&server, "Alice").await;

    let (mut ws, _) = connect_async(server.ws_url("/presence/ws", &alice.access_token))
        .await
        .unwrap();

    server.post_auth("/status", &alice.access_token).await.unwrap();

    let frame = tokio::time::timeout(Duration::from_millis(300), ws.next()).await;
    assert!(frame.is_err(), "no event expected, got {frame:?}");
}

#[tokio::test]
async fn test_anonymous_observer_is_rejected() {
    let server = TestServer::start().await.unwrap();

    let url = format!("ws://{}/presence/ws", server.addr);
    match connect_async(url).await {
        Err(tokio_tungstenite::tungstenite::Error::Http(response)) => {
            assert_eq!(response.status().as_u16(), 401);
        }
        other => panic!("expected HTTP 401 handshake failure, got {other:?}"),
    }
}
