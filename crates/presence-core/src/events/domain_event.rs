//! Domain events - events emitted when domain state changes
//!
//! Events are published after the state change has been persisted and are
//! relayed to presence observers over WebSocket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::value_objects::{PresenceStatus, UserId};

/// All possible domain events
///
/// Serialized with an internal `type` tag, e.g.
/// `{"type":"PRESENCE_UPDATE","user_id":"42","status":"busy",...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    PresenceUpdate(PresenceUpdatedEvent),
    UserRegistered(UserRegisteredEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PresenceUpdate(_) => "PRESENCE_UPDATE",
            Self::UserRegistered(_) => "USER_REGISTERED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::PresenceUpdate(e) => e.timestamp,
            Self::UserRegistered(e) => e.timestamp,
        }
    }

    /// The user the event is about
    pub fn user_id(&self) -> UserId {
        match self {
            Self::PresenceUpdate(e) => e.user_id,
            Self::UserRegistered(e) => e.user_id,
        }
    }

    pub fn presence_updated(user: &User) -> Self {
        Self::PresenceUpdate(PresenceUpdatedEvent {
            user_id: user.id,
            name: user.name.clone(),
            status: user.status,
            busy: user.status.is_busy(),
            timestamp: Utc::now(),
        })
    }

    pub fn user_registered(user: &User) -> Self {
        Self::UserRegistered(UserRegisteredEvent {
            user_id: user.id,
            name: user.name.clone(),
            status: user.status,
            timestamp: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceUpdatedEvent {
    pub user_id: UserId,
    pub name: String,
    pub status: PresenceStatus,
    pub busy: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegisteredEvent {
    pub user_id: UserId,
    pub name: String,
    pub status: PresenceStatus,
    pub timestamp: DateTime<Utc>,
}
