//! Authenticated caller
//!
//! The session guard verifies the token and stores the resolved
//! [`AuthSession`] in request extensions; handlers pick it up from there.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use presence_common::AppError;
use presence_core::UserId;
use presence_service::AuthSession;

use crate::response::ApiError;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub session_id: String,
}

impl From<AuthSession> for AuthUser {
    fn from(session: AuthSession) -> Self {
        Self {
            user_id: session.user_id,
            session_id: session.session_id,
        }
    }
}

impl AuthUser {
    /// The session this request authenticated with
    pub fn session(&self) -> AuthSession {
        AuthSession {
            user_id: self.user_id,
            session_id: self.session_id.clone(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .cloned()
            .map(AuthUser::from)
            .ok_or(ApiError::App(AppError::MissingAuth))
    }
}
