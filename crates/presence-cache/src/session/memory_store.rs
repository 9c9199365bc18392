//! Process-local session storage, used when Redis is not configured.
//!
//! Expired sessions are dropped on lookup, and swept from the whole map
//! whenever it grows past the purge threshold, so logins that are never
//! reused do not accumulate.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use presence_core::traits::{RepoResult, SessionRepository};
use presence_core::{Session, UserId};
use tracing::debug;

/// Map size at which `store` first sweeps expired sessions
const DEFAULT_PURGE_THRESHOLD: usize = 1024;

/// In-memory session store backed by a `DashMap`
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
    purge_threshold: usize,
    next_purge_at: AtomicUsize,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_purge_threshold(DEFAULT_PURGE_THRESHOLD)
    }
}

impl InMemorySessionStore {
    /// Create an empty store with the default purge threshold
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that sweeps once it holds `threshold` sessions
    #[must_use]
    pub fn with_purge_threshold(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            sessions: DashMap::new(),
            purge_threshold: threshold,
            next_purge_at: AtomicUsize::new(threshold),
        }
    }

    /// Drop expired sessions, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before.saturating_sub(self.sessions.len())
    }

    /// Sweep when the map has reached the next purge mark.
    ///
    /// The mark doubles with the live count afterwards, so a store full of
    /// live sessions is not rescanned on every insert.
    fn maybe_purge(&self) {
        let len = self.sessions.len();
        if len < self.next_purge_at.load(Ordering::Relaxed) {
            return;
        }

        let removed = self.purge_expired();
        let remaining = self.sessions.len();
        self.next_purge_at.store(
            self.purge_threshold.max(remaining.saturating_mul(2)),
            Ordering::Relaxed,
        );
        debug!(removed, remaining, "Purged expired sessions");
    }

    /// Number of stored sessions, expired ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    /// Insert or replace a session
    async fn store(&self, session: &Session) -> RepoResult<()> {
        self.sessions.insert(session.id.clone(), session.clone());
        self.maybe_purge();
        Ok(())
    }

    /// Look up a live session; an expired one is removed and reported absent
    async fn find(&self, session_id: &str) -> RepoResult<Option<Session>> {
        let found = self
            .sessions
            .get(session_id)
            .map(|entry| entry.value().clone());

        match found {
            Some(session) if session.is_expired() => {
                self.sessions.remove(session_id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Copy the new expiry onto a stored session
    async fn touch(&self, session: &Session) -> RepoResult<()> {
        if let Some(mut entry) = self.sessions.get_mut(&session.id) {
            entry.expires_at = session.expires_at;
        }
        Ok(())
    }

    /// Remove one session
    async fn revoke(&self, session_id: &str) -> RepoResult<()> {
        self.sessions.remove(session_id);
        Ok(())
    }

    /// Remove every session of a user, returning how many were removed
    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<usize> {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.user_id != user_id);
        Ok(before.saturating_sub(self.sessions.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_find() {
        let store = InMemorySessionStore::new();
        let session = Session::new("s1", UserId::new(1), 60);

        store.store(&session).await.unwrap();
        assert_eq!(store.find("s1").await.unwrap(), Some(session));
        assert!(store.find("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let store = InMemorySessionStore::new();
        store
            .store(&Session::new("old", UserId::new(1), 0))
            .await
            .unwrap();

        assert!(store.find("old").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_touch_extends_expiry() {
        let store = InMemorySessionStore::new();
        let mut session = Session::new("s1", UserId::new(1), 0);
        store.store(&session).await.unwrap();

        session.extend(60);
        store.touch(&session).await.unwrap();
        assert!(store.find("s1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_revoke_all_for_user() {
        let store = InMemorySessionStore::new();
        for (id, user) in [("a", 1), ("b", 1), ("c", 2)] {
            store
                .store(&Session::new(id, UserId::new(user), 60))
                .await
                .unwrap();
        }

        assert_eq!(store.revoke_all_for_user(UserId::new(1)).await.unwrap(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.find("c").await.unwrap().is_some());

        store.revoke("c").await.unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let store = InMemorySessionStore::new();
        store
            .sessions
            .insert("old".to_string(), Session::new("old", UserId::new(1), 0));
        store
            .sessions
            .insert("new".to_string(), Session::new("new", UserId::new(1), 60));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_store_sweeps_expired_sessions_past_threshold() {
        let store = InMemorySessionStore::with_purge_threshold(100);
        for i in 0..1000 {
            store
                .store(&Session::new(format!("dead-{i}"), UserId::new(1), -1))
                .await
                .unwrap();
        }
        store
            .store(&Session::new("live", UserId::new(2), 60))
            .await
            .unwrap();

        // No lookups: only the sweep inside `store` can have shrunk the map.
        assert!(store.len() < 100, "map still holds {} sessions", store.len());
        assert!(store.find("live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_live_sessions_survive_sweeps() {
        let store = InMemorySessionStore::with_purge_threshold(4);
        for i in 0..50 {
            store
                .store(&Session::new(format!("s{i}"), UserId::new(1), 60))
                .await
                .unwrap();
        }

        assert_eq!(store.len(), 50);
    }
}
