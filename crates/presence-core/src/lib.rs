//! # presence-core
//!
//! Domain layer containing the user entity, the presence state machine,
//! repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{NewUser, ProfileUpdate, Session, User};
pub use error::DomainError;
pub use events::{DomainEvent, PresenceUpdatedEvent, UserRegisteredEvent};
pub use traits::{EventPublisher, RepoResult, SessionRepository, UserRepository};
pub use value_objects::{IdGenerator, PresenceStatus, PresenceStatusParseError, UserId, UserIdParseError};
