//! API integration tests
//!
//! Each test spawns its own server over the in-memory stores.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::{header, Method, StatusCode};
use serde_json::json;

async fn signup(server: &TestServer, name: &str) -> (SignupRequest, AuthResponse) {
    let request = SignupRequest::named(name);
    let response = server.post("/signup", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

async fn presence(server: &TestServer, token: &str) -> Presence {
    let response = server.get_auth("/status", token).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_readiness_with_in_memory_stores() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "in_memory");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.post("/login", &json!({})).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_signup() {
    let server = TestServer::start().await.unwrap();
    let (request, auth) = signup(&server, "Alice").await;

    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.user.name, "Alice");
    assert_eq!(auth.user.email, request.email);
    assert_eq!(auth.user.level.as_deref(), Some("Senior"));
    assert_eq!(auth.user.status, "available");
    assert!(!auth.user.busy);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let server = TestServer::start().await.unwrap();
    let (request, _) = signup(&server, "Alice").await;

    let response = server.post("/signup", &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_signup_validation() {
    let server = TestServer::start().await.unwrap();
    let mut request = SignupRequest::named("Alice");
    request.email = "not-an-email".to_string();

    let response = server.post("/signup", &request).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["email"].is_array());
}

#[tokio::test]
async fn test_signup_with_configured_default_status() {
    let server = TestServer::start_with(&[("PRESENCE_DEFAULT_STATUS", "busy")])
        .await
        .unwrap();
    let (_, auth) = signup(&server, "Alice").await;
    assert_eq!(auth.user.status, "busy");
}

#[tokio::test]
async fn test_login() {
    let server = TestServer::start().await.unwrap();
    let (request, registered) = signup(&server, "Alice").await;

    let response = server
        .post("/login", &LoginRequest::from_signup(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.id, registered.user.id);

    let response = server
        .post(
            "/login",
            &json!({ "email": request.email, "password": "wrong-password" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_refresh_token() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = signup(&server, "Alice").await;

    let response = server
        .post("/auth/refresh", &json!({ "refresh_token": auth.refresh_token }))
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/", &refreshed.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout_denies_further_requests() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = signup(&server, "Alice").await;

    let response = server.delete_auth("/logout", &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/", &auth.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "SESSION_EXPIRED");
}

#[tokio::test]
async fn test_logout_everywhere() {
    let server = TestServer::start().await.unwrap();
    let (request, first) = signup(&server, "Alice").await;
    let response = server
        .post("/login", &LoginRequest::from_signup(&request))
        .await
        .unwrap();
    let second: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .client
        .delete(format!("{}/logout", server.base_url()))
        .bearer_auth(&first.access_token)
        .json(&json!({ "all": true }))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/", &second.access_token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_with_malformed_body_keeps_sessions() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = signup(&server, "Alice").await;

    let response = server
        .client
        .delete(format!("{}/logout", server.base_url()))
        .bearer_auth(&auth.access_token)
        .json(&json!({ "all": "yes" }))
        .send()
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");

    let response = server.get_auth("/", &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Session guard
// ============================================================================

#[tokio::test]
async fn test_anonymous_browser_is_redirected() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .request_accepting(Method::GET, "/", "text/html,application/xhtml+xml")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn test_anonymous_api_client_is_denied() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_anonymous_toggle_changes_nothing() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;

    let response = server
        .request_accepting(Method::POST, "/status", "text/html")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = server.client.post(format!("{}/status", server.base_url())).send().await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(presence(&server, &alice.access_token).await.status, "available");
}

#[tokio::test]
async fn test_garbage_token_is_denied() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/", "not.a.jwt").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_refresh_token_cannot_be_used_as_access_token() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = signup(&server, "Alice").await;

    let response = server.get_auth("/", &auth.refresh_token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Directory
// ============================================================================

#[tokio::test]
async fn test_directory_excludes_caller() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;
    let (_, bob) = signup(&server, "Bob").await;
    let (_, carol) = signup(&server, "Carol").await;

    let response = server.get_auth("/", &alice.access_token).await.unwrap();
    let directory: Directory = assert_json(response, StatusCode::OK).await.unwrap();

    let ids: Vec<&str> = directory.users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec![bob.user.id.as_str(), carol.user.id.as_str()]);
    assert_eq!(directory.total, 2);
    assert!(directory.users.iter().all(|u| u.id != alice.user.id));
}

#[tokio::test]
async fn test_directory_for_lone_user_is_empty() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;

    let response = server.get_auth("/", &alice.access_token).await.unwrap();
    let directory: Directory = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(directory.users.is_empty());
}

// ============================================================================
// Presence toggle
// ============================================================================

#[tokio::test]
async fn test_toggle_flips_and_persists() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;

    let response = server.post_auth("/status", &alice.access_token).await.unwrap();
    let toggled: Presence = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.user_id, alice.user.id);
    assert_eq!(toggled.status, "busy");
    assert!(toggled.busy);

    assert_eq!(presence(&server, &alice.access_token).await.status, "busy");
}

#[tokio::test]
async fn test_toggle_twice_restores() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;

    for _ in 0..2 {
        let response = server.post_auth("/status", &alice.access_token).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let current = presence(&server, &alice.access_token).await;
    assert_eq!(current.status, "available");
    assert!(!current.busy);
}

#[tokio::test]
async fn test_toggle_is_visible_to_others() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;
    let (_, bob) = signup(&server, "Bob").await;

    server.post_auth("/status", &alice.access_token).await.unwrap();

    let response = server.get_auth("/", &bob.access_token).await.unwrap();
    let directory: Directory = assert_json(response, StatusCode::OK).await.unwrap();
    let entry = directory
        .users
        .iter()
        .find(|u| u.id == alice.user.id)
        .unwrap();
    assert_eq!(entry.status, "busy");
    assert!(entry.busy);
    assert_eq!(entry.name, "Alice");
}

#[tokio::test]
async fn test_toggle_script_response() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;

    let response = server
        .request_accepting(Method::POST, "/status", "text/javascript, */*; q=0.01")
        .bearer_auth(&alice.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/javascript"));

    let body = response.text().await.unwrap();
    assert!(body.contains(&format!("presence-{}", alice.user.id)));
    assert!(body.contains("\"busy\""));
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_edit_leaves_presence() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;
    server.post_auth("/status", &alice.access_token).await.unwrap();

    let response = server
        .patch_auth(
            "/users/@me",
            &alice.access_token,
            &json!({ "name": "Alice Liddell", "level": "Staff" }),
        )
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.name, "Alice Liddell");
    assert_eq!(me.level.as_deref(), Some("Staff"));
    assert_eq!(me.github_link.as_deref(), Some("https://github.com/alice"));
    assert_eq!(me.status, "busy");

    let response = server.get_auth("/users/@me", &alice.access_token).await.unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.name, "Alice Liddell");
}

#[tokio::test]
async fn test_profile_edit_validation() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = signup(&server, "Alice").await;

    let response = server
        .patch_auth(
            "/users/@me",
            &alice.access_token,
            &json!({ "github_link": "not a url" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
