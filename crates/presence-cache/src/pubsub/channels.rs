//! Pub/Sub channel definitions.

use presence_core::DomainEvent;

/// Presence toggles
pub const PRESENCE_CHANNEL: &str = "presence:updates";
/// Roster changes (new users)
pub const USERS_CHANNEL: &str = "presence:users";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    Presence,
    Users,
}

impl PubSubChannel {
    pub const ALL: [Self; 2] = [Self::Presence, Self::Users];

    /// Channel an event is published on
    #[must_use]
    pub fn for_event(event: &DomainEvent) -> Self {
        match event {
            DomainEvent::PresenceUpdate(_) => Self::Presence,
            DomainEvent::UserRegistered(_) => Self::Users,
        }
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Presence => PRESENCE_CHANNEL,
            Self::Users => USERS_CHANNEL,
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|channel| channel.name() == name)
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
