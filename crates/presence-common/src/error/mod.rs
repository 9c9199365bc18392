//! Application error type shared by the service and API layers

mod app_error;

pub use app_error::{AppError, AppResult, ErrorResponse};
