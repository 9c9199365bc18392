//! Test fixtures and data generators

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const TEST_PASSWORD: &str = "secret123";

/// Sign-up body
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
}

impl SignupRequest {
    pub fn named(name: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            name: name.to_string(),
            email: format!("{}{suffix}@example.com", name.to_lowercase()),
            password: TEST_PASSWORD.to_string(),
            level: Some("Senior".to_string()),
            github_link: Some(format!("https://github.com/{}", name.to_lowercase())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: CurrentUser,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub level: Option<String>,
    pub github_link: Option<String>,
    pub status: String,
    pub busy: bool,
}

#[derive(Debug, Deserialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
    pub status: String,
    pub busy: bool,
}

#[derive(Debug, Deserialize)]
pub struct Directory {
    pub users: Vec<DirectoryEntry>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct Presence {
    pub user_id: String,
    pub status: String,
    pub busy: bool,
}
