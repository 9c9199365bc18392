//! Session storage in Redis.
//!
//! Each session lives under `session:{id}` with a TTL matching its expiry; the
//! ids of a user's sessions are tracked in `user_sessions:{user_id}` so they
//! can all be revoked at once.

use async_trait::async_trait;
use presence_core::traits::{RepoResult, SessionRepository};
use presence_core::{Session, UserId};
use redis::AsyncCommands;

use crate::pool::{RedisPool, RedisPoolError};

const SESSION_PREFIX: &str = "session:";
const USER_SESSIONS_PREFIX: &str = "user_sessions:";

/// Redis-backed [`SessionRepository`]
#[derive(Clone, Debug)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    /// Create a store over the given pool
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    fn user_key(user_id: UserId) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }

    /// Redis rejects a zero TTL, so an about-to-expire session keeps one second
    fn ttl(session: &Session) -> u64 {
        session.remaining_seconds().max(1)
    }

    async fn write(&self, session: &Session) -> RepoResult<()> {
        let ttl = Self::ttl(session);
        self.pool
            .set(&Self::key(&session.id), session, Some(ttl))
            .await?;

        let user_key = Self::user_key(session.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, &session.id)
            .await
            .map_err(RedisPoolError::from)?;
        // The index lives as long as the newest session
        conn.expire::<_, ()>(&user_key, ttl as i64)
            .await
            .map_err(RedisPoolError::from)?;
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for RedisSessionStore {
    async fn store(&self, session: &Session) -> RepoResult<()> {
        self.write(session).await?;

        tracing::debug!(
            session_id = %session.id,
            user_id = %session.user_id,
            "Stored session"
        );
        Ok(())
    }

    async fn find(&self, session_id: &str) -> RepoResult<Option<Session>> {
        let session: Option<Session> = self.pool.get_value(&Self::key(session_id)).await?;
        Ok(session.filter(|s| !s.is_expired()))
    }

    async fn touch(&self, session: &Session) -> RepoResult<()> {
        self.write(session).await
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<()> {
        let key = Self::key(session_id);

        if let Some(session) = self.pool.get_value::<Session>(&key).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(session.user_id), session_id)
                .await
                .map_err(RedisPoolError::from)?;
        }

        if self.pool.delete(&key).await? {
            tracing::debug!(session_id = %session_id, "Revoked session");
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<usize> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let session_ids: Vec<String> = conn
            .smembers(&user_key)
            .await
            .map_err(RedisPoolError::from)?;
        let keys: Vec<String> = session_ids.iter().map(|id| Self::key(id)).collect();
        let removed = self.pool.delete_many(&keys).await?;

        conn.del::<_, ()>(&user_key)
            .await
            .map_err(RedisPoolError::from)?;

        tracing::info!(user_id = %user_id, count = removed, "Revoked all sessions for user");
        Ok(removed.max(0) as usize)
    }
}
