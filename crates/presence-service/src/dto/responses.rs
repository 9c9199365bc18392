//! Response DTOs for API endpoints
//!
//! User ids are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use presence_core::PresenceStatus;
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Directory entry for another user (no email)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    pub status: PresenceStatus,
    pub busy: bool,
}

/// The caller's own record
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    pub status: PresenceStatus,
    pub busy: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everyone except the caller, ascending by id
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

impl DirectoryResponse {
    pub fn new(users: Vec<UserResponse>) -> Self {
        let total = users.len();
        Self { users, total }
    }
}

// ============================================================================
// Presence Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PresenceResponse {
    pub user_id: String,
    pub status: PresenceStatus,
    pub busy: bool,
    pub updated_at: DateTime<Utc>,
}

impl PresenceResponse {
    pub fn new(user_id: impl ToString, status: PresenceStatus, updated_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            status,
            busy: status.is_busy(),
            updated_at,
        }
    }

    /// Partial-page update for clients that asked for JavaScript
    pub fn to_script(&self) -> String {
        format!(
            "(function(){{var el=document.getElementById(\"presence-{id}\");\
             if(el){{el.dataset.status=\"{status}\";el.textContent=\"{status}\";}}\
             var btn=document.getElementById(\"presence-toggle\");\
             if(btn){{btn.dataset.busy=\"{busy}\";}}}})();",
            id = self.user_id,
            status = self.status.as_str(),
            busy = self.busy,
        )
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of one dependency probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Healthy,
    Unhealthy,
    /// Backend not configured; the in-process store is used instead
    InMemory,
}

impl CheckStatus {
    pub fn from_probe(ok: bool) -> Self {
        if ok {
            Self::Healthy
        } else {
            Self::Unhealthy
        }
    }

    pub fn is_ok(self) -> bool {
        !matches!(self, Self::Unhealthy)
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub redis: CheckStatus,
}

impl ReadinessResponse {
    pub fn new(database: CheckStatus, redis: CheckStatus) -> Self {
        let ready = database.is_ok() && redis.is_ok();
        Self {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks { database, redis },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database.is_ok() && self.checks.redis.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_response_serialization() {
        let resp = PresenceResponse::new(42, PresenceStatus::Busy, Utc::now());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["user_id"], "42");
        assert_eq!(json["status"], "busy");
        assert_eq!(json["busy"], true);
    }

    #[test]
    fn test_presence_script_mentions_new_status() {
        let script = PresenceResponse::new(7, PresenceStatus::Available, Utc::now()).to_script();
        assert!(script.contains("presence-7"));
        assert!(script.contains("\"available\""));
        assert!(script.contains("dataset.busy=\"false\""));
    }

    #[test]
    fn test_directory_total() {
        let resp = DirectoryResponse::new(Vec::new());
        assert_eq!(resp.total, 0);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::new(CheckStatus::Healthy, CheckStatus::InMemory);
        assert_eq!(ready.status, "ready");
        assert!(ready.is_ready());
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["checks"]["redis"], "in_memory");

        let not_ready = ReadinessResponse::new(CheckStatus::Healthy, CheckStatus::Unhealthy);
        assert_eq!(not_ready.status, "not_ready");
        assert!(!not_ready.is_ready());
    }
}
