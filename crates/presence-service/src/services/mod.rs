//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of one
//! operation.

pub mod auth;
pub mod context;
pub mod directory;
pub mod error;
pub mod health;
pub mod presence;
pub mod seed;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthService, AuthSession};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use directory::DirectoryService;
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use presence::PresenceService;
pub use seed::{SeedReport, SeedService, DEFAULT_SEED_COUNT};
pub use user::UserService;
