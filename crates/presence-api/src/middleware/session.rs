//! Session guard for protected routes
//!
//! Runs before any protected handler. A request without a live session never
//! reaches the handler: browsers are sent to the sign-in page, everyone else
//! gets a 401.

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use presence_common::AppError;
use presence_service::{AuthService, ServiceError};
use serde::Deserialize;
use tracing::debug;

use crate::extractors::ResponseFormat;
use crate::response::ApiError;
use crate::state::AppState;

/// Where unauthenticated browser requests are redirected
pub const LOGIN_PATH: &str = "/login";

/// `?token=` fallback for clients that cannot set headers (WebSocket in browsers)
#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let format = ResponseFormat::from_headers(request.headers());

    let result = match request_token(&request) {
        Some(token) => {
            AuthService::new(state.service_context())
                .authenticate(&token)
                .await
        }
        None => Err(ServiceError::App(AppError::MissingAuth)),
    };

    match result {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(e) if e.is_unauthenticated() && format == ResponseFormat::Html => {
            debug!(path = %request.uri().path(), reason = e.error_code(), "Redirecting to sign-in");
            Redirect::to(LOGIN_PATH).into_response()
        }
        Err(e) => {
            debug!(path = %request.uri().path(), reason = e.error_code(), "Request denied");
            ApiError::from(e).into_response()
        }
    }
}

fn request_token(request: &Request) -> Option<String> {
    if let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    Query::<TokenQuery>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(q)| q.token)
        .filter(|t| !t.is_empty())
}
