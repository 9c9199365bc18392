//! Session entity - a server-side login session referenced by issued tokens

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring `ttl_seconds` from now
    pub fn new(id: impl Into<String>, user_id: UserId, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    /// Whether the expiry has passed
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Seconds left before expiry, zero once expired
    pub fn remaining_seconds(&self) -> u64 {
        (self.expires_at - Utc::now()).num_seconds().max(0) as u64
    }

    /// Push the expiry forward (used on token refresh)
    pub fn extend(&mut self, ttl_seconds: i64) {
        self.expires_at = Utc::now() + Duration::seconds(ttl_seconds);
    }
}
