//! Route definitions

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{auth, directory, health, presence, realtime, users};
use crate::middleware::require_session;
use crate::state::AppState;

/// Application routes, excluding health checks
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// Health check routes (kept outside rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// Everything behind the session guard
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(directory::index))
        .route("/status", get(presence::current).post(presence::toggle))
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/logout", delete(auth::logout))
        .route("/presence/ws", get(realtime::presence_stream))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
}
