//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `presence-db` and `presence-cache`
//! provide Postgres/Redis and in-memory implementations.

use async_trait::async_trait;

use crate::entities::{ProfileUpdate, Session, User};
use crate::error::DomainError;
use crate::events::DomainEvent;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// All users except `caller`, ascending by id
    async fn list_except(&self, caller: UserId) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Apply a profile edit and return the updated user
    async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> RepoResult<User>;

    /// Flip the user's presence in a single atomic write and return the
    /// row as written. `UserNotFound` when no row matched.
    async fn toggle_presence(&self, id: UserId) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Total number of users
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a session until its `expires_at`
    async fn store(&self, session: &Session) -> RepoResult<()>;

    /// Look up a live session; expired sessions are reported as absent
    async fn find(&self, session_id: &str) -> RepoResult<Option<Session>>;

    /// Replace the stored expiry of an existing session
    async fn touch(&self, session: &Session) -> RepoResult<()>;

    /// Destroy one session
    async fn revoke(&self, session_id: &str) -> RepoResult<()>;

    /// Destroy every session of a user, returning how many were removed
    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<usize>;
}

// ============================================================================
// Event Publisher
// ============================================================================

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to observers. Returns the number of receivers that
    /// got it, as far as the transport can tell.
    async fn publish(&self, event: &DomainEvent) -> RepoResult<usize>;
}
