//! # presence-api
//!
//! HTTP server for the presence board built with Axum: the user directory,
//! the presence toggle, sign-in flows, and a WebSocket stream of presence
//! changes.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
