//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Sign-up request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    /// Free-text skill label, e.g. "Senior"
    #[validate(length(max = 50, message = "Level must be at most 50 characters"))]
    pub level: Option<String>,

    #[validate(url(message = "GitHub link must be a URL"))]
    pub github_link: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Logout request; `all` signs out every session of the caller
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct LogoutRequest {
    #[serde(default)]
    pub all: bool,
}

// ============================================================================
// User Requests
// ============================================================================

/// Profile edit for the caller. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 50, message = "Level must be at most 50 characters"))]
    pub level: Option<String>,

    #[validate(url(message = "GitHub link must be a URL"))]
    pub github_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register() -> RegisterRequest {
        RegisterRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
            level: Some("Senior".to_string()),
            github_link: Some("https://github.com/alice".to_string()),
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(register().validate().is_ok());

        let mut req = register();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());

        let mut req = register();
        req.password = "short".to_string();
        assert!(req.validate().is_err());

        let mut req = register();
        req.github_link = Some("alice".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_optional_profile_fields() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name":"Bob","email":"bob@example.com","password":"secret1"}"#,
        )
        .unwrap();
        assert!(req.level.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_logout_defaults_to_single_session() {
        let req: LogoutRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.all);
    }

    #[test]
    fn test_update_profile_rejects_empty_name() {
        let req = UpdateProfileRequest {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
        assert!(UpdateProfileRequest::default().validate().is_ok());
    }
}
