//! Presence status - the two-state availability flag carried by every user
//!
//! The state machine has exactly two states and one transition rule:
//! `available -> busy` and `busy -> available`. There is no terminal state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    #[default]
    Available,
    Busy,
}

impl PresenceStatus {
    /// The only transition: flip to the other state
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Available => Self::Busy,
            Self::Busy => Self::Available,
        }
    }

    /// Map the persisted `busy` column onto a status
    #[inline]
    pub const fn from_busy(busy: bool) -> Self {
        if busy {
            Self::Busy
        } else {
            Self::Available
        }
    }

    /// Value stored in the `busy` column
    #[inline]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Lowercase name, as serialized
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown presence status '{0}' (expected 'available' or 'busy')")]
pub struct PresenceStatusParseError(pub String);

impl FromStr for PresenceStatus {
    type Err = PresenceStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "busy" => Ok(Self::Busy),
            other => Err(PresenceStatusParseError(other.to_string())),
        }
    }
}

impl From<PresenceStatus> for bool {
    fn from(status: PresenceStatus) -> Self {
        status.is_busy()
    }
}
