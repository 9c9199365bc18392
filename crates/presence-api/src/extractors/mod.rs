//! Axum extractors for request handling

mod auth;
mod format;
mod validated;

pub use auth::AuthUser;
pub use format::ResponseFormat;
pub use validated::ValidatedJson;
