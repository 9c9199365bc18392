//! End-to-end run against Postgres
//!
//! Skipped unless DATABASE_URL points at a Postgres server.
//!
//! Run with: cargo test -p integration-tests --test postgres_tests

use std::time::{SystemTime, UNIX_EPOCH};

use integration_tests::{assert_json, fixtures::*, postgres_url, TestServer};
use reqwest::StatusCode;

#[tokio::test]
async fn test_toggle_round_trip_on_postgres() {
    let Some(url) = postgres_url() else {
        return;
    };
    let server = TestServer::start_with(&[("DATABASE_URL", url.as_str())])
        .await
        .unwrap();

    // The database outlives the test run, so the email must be fresh
    let mut signup = SignupRequest::named("Pg");
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    signup.email = format!("pg-{nanos}@example.com");

    let response = server.post("/signup", &signup).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.post_auth("/status", &auth.access_token).await.unwrap();
    let toggled: Presence = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(toggled.busy);

    let response = server.post_auth("/status", &auth.access_token).await.unwrap();
    let toggled: Presence = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!toggled.busy);

    let response = server.get_auth("/", &auth.access_token).await.unwrap();
    let directory: Directory = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(directory.users.iter().all(|u| u.id != auth.user.id));
}
