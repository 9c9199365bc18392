//! Process-local implementation of UserRepository
//!
//! Backs `DATABASE_URL=memory://` deployments and the test suites. Every
//! mutation happens under one write lock, which gives the toggle the same
//! atomicity as the single-statement SQL update.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::instrument;

use presence_core::traits::{RepoResult, UserRepository};
use presence_core::{DomainError, ProfileUpdate, User, UserId};

use super::error::user_not_found;

struct StoredUser {
    user: User,
    password_hash: String,
}

/// In-memory user store keyed (and therefore ordered) by id
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, StoredUser>>,
    unavailable: AtomicBool,
    writes: AtomicU64,
}

impl InMemoryUserRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with `DatabaseError`, as a lost database would
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for InMemoryUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryUserRepository")
            .field("users", &self.users.read().len())
            .field("unavailable", &self.unavailable.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.check_available()?;
        Ok(self.users.read().get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.check_available()?;
        Ok(self
            .users
            .read()
            .values()
            .find(|stored| same_email(&stored.user.email, email))
            .map(|stored| stored.user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        self.check_available()?;
        Ok(self
            .users
            .read()
            .values()
            .any(|stored| same_email(&stored.user.email, email)))
    }

    #[instrument(skip(self))]
    async fn list_except(&self, caller: UserId) -> RepoResult<Vec<User>> {
        self.check_available()?;
        Ok(self
            .users
            .read()
            .values()
            .filter(|stored| stored.user.id != caller)
            .map(|stored| stored.user.clone())
            .collect())
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.check_available()?;
        let mut users = self.users.write();

        if users
            .values()
            .any(|stored| same_email(&stored.user.email, &user.email))
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        if users.contains_key(&user.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate primary key {}",
                user.id
            )));
        }

        users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        self.record_write();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> RepoResult<User> {
        self.check_available()?;
        let mut users = self.users.write();
        let stored = users.get_mut(&id).ok_or_else(|| user_not_found(id))?;

        stored.user.apply_profile(update.clone());
        stored.user.updated_at = Utc::now();
        self.record_write();
        Ok(stored.user.clone())
    }

    #[instrument(skip(self))]
    async fn toggle_presence(&self, id: UserId) -> RepoResult<User> {
        self.check_available()?;
        let mut users = self.users.write();
        let stored = users.get_mut(&id).ok_or_else(|| user_not_found(id))?;

        stored.user.toggle_presence();
        self.record_write();
        Ok(stored.user.clone())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        self.check_available()?;
        Ok(self
            .users
            .read()
            .get(&id)
            .map(|stored| stored.password_hash.clone()))
    }

    async fn count(&self) -> RepoResult<i64> {
        self.check_available()?;
        Ok(self.users.read().len() as i64)
    }
}
