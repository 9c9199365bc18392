//! Sign-up, sign-in, token refresh and sign-out

use axum::{body::Bytes, extract::State, Json};
use presence_service::{
    AuthResponse, AuthService, LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let response = AuthService::new(state.service_context())
        .register(request)
        .await?;
    Ok(Created(Json(response)))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::new(state.service_context())
        .login(request)
        .await?;
    Ok(Json(response))
}

/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::new(state.service_context())
        .refresh(request)
        .await?;
    Ok(Json(response))
}

/// DELETE /logout
///
/// Body is optional; `{"all": true}` ends every session of the caller.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> ApiResult<NoContent> {
    let request = logout_request(&body)?;
    AuthService::new(state.service_context())
        .logout(&auth.session(), request)
        .await?;
    Ok(NoContent)
}

/// An empty body means the current session only; anything else must parse.
fn logout_request(body: &[u8]) -> Result<LogoutRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(LogoutRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_body(e.to_string()))
}
