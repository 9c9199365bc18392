//! Authentication service
//!
//! Handles sign-up, login, token refresh, logout, and resolving a bearer
//! token to an active session for the request guard.

use presence_common::auth::{hash_password, validate_password_strength, verify_password};
use presence_common::AppError;
use presence_core::{DomainError, DomainEvent, NewUser, Session, User, UserId};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, LogoutRequest, RefreshTokenRequest,
    RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// The caller behind a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub session_id: String,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create an auth service over the context
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and sign them in
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = NewUser {
            name: request.name.trim().to_string(),
            email,
            level: request.level,
            github_link: request.github_link,
        }
        .into_user(self.ctx.generate_id(), self.ctx.presence().default_status);

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, status = %user.status, "User registered");

        if let Some(publisher) = self.ctx.publisher() {
            let event = DomainEvent::user_registered(&user);
            if let Err(e) = publisher.publish(&event).await {
                warn!(user_id = %user.id, error = %e, "Failed to publish registration");
            }
        }

        self.open_session(&user).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        self.open_session(&user).await
    }

    /// Exchange a refresh token for a new pair bound to the same session
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let mut session = self.active_session(&claims.session_id, user_id).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::SessionExpired))?;

        session.extend(self.ctx.jwt_service().refresh_token_expiry());
        self.ctx.session_repo().touch(&session).await?;

        let tokens = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, &session.id)?;

        debug!(user_id = %user.id, "Tokens refreshed");

        Ok(AuthResponse::new(
            tokens.access_token,
            tokens.refresh_token,
            tokens.expires_in,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Destroy the caller's session, or all of them
    #[instrument(skip(self), fields(user_id = %auth.user_id))]
    pub async fn logout(&self, auth: &AuthSession, request: LogoutRequest) -> ServiceResult<()> {
        if request.all {
            let revoked = self
                .ctx
                .session_repo()
                .revoke_all_for_user(auth.user_id)
                .await?;
            info!(revoked, "User signed out everywhere");
        } else {
            self.ctx.session_repo().revoke(&auth.session_id).await?;
            info!("User signed out");
        }
        Ok(())
    }

    /// Resolve an access token to a live session
    ///
    /// # Errors
    /// `MissingAuth` for an empty token, `InvalidToken`/`TokenExpired` when
    /// the JWT does not verify, `SessionExpired` when the session was revoked
    /// or timed out
    pub async fn authenticate(&self, token: &str) -> ServiceResult<AuthSession> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ServiceError::App(AppError::MissingAuth));
        }

        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let user_id = claims.user_id()?;
        let session = self.active_session(&claims.session_id, user_id).await?;

        Ok(AuthSession {
            user_id,
            session_id: session.id,
        })
    }

    async fn active_session(&self, session_id: &str, user_id: UserId) -> ServiceResult<Session> {
        let session = self
            .ctx
            .session_repo()
            .find(session_id)
            .await?
            .ok_or(ServiceError::App(AppError::SessionExpired))?;

        if session.user_id != user_id {
            warn!(%user_id, owner = %session.user_id, "Token presented for a foreign session");
            return Err(ServiceError::App(AppError::InvalidToken));
        }
        if session.is_expired() {
            return Err(ServiceError::App(AppError::SessionExpired));
        }
        Ok(session)
    }

    async fn open_session(&self, user: &User) -> ServiceResult<AuthResponse> {
        let jwt = self.ctx.jwt_service();
        let session = Session::new(
            Uuid::new_v4().to_string(),
            user.id,
            jwt.refresh_token_expiry(),
        );
        self.ctx.session_repo().store(&session).await?;

        let tokens = jwt.generate_token_pair(user.id, &session.id)?;

        Ok(AuthResponse::new(
            tokens.access_token,
            tokens.refresh_token,
            tokens.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
