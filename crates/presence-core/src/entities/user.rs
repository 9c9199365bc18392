//! User entity - a roster member with a presence status

use chrono::{DateTime, Utc};

use crate::value_objects::{PresenceStatus, UserId};

/// A registered user as seen by the directory and the presence toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Free-text skill label, e.g. "Senior"
    pub level: Option<String>,
    pub github_link: Option<String>,
    pub status: PresenceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user with fresh timestamps and no profile details
    pub fn new(id: UserId, name: String, email: String, status: PresenceStatus) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            level: None,
            github_link: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the user is busy
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    /// Flip presence and return the new status
    pub fn toggle_presence(&mut self) -> PresenceStatus {
        self.status = self.status.toggled();
        self.updated_at = Utc::now();
        self.status
    }

    /// Apply a profile edit. Identity, email and presence are untouched.
    pub fn apply_profile(&mut self, update: ProfileUpdate) -> bool {
        let mut changed = false;

        if let Some(name) = update.name {
            if name != self.name {
                self.name = name;
                changed = true;
            }
        }
        if let Some(level) = update.level {
            if self.level.as_deref() != Some(level.as_str()) {
                self.level = Some(level);
                changed = true;
            }
        }
        if let Some(link) = update.github_link {
            if self.github_link.as_deref() != Some(link.as_str()) {
                self.github_link = Some(link);
                changed = true;
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Fields supplied when a user record is created (registration or seeding)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub level: Option<String>,
    pub github_link: Option<String>,
}

impl NewUser {
    /// Materialize the entity with a fresh id and an initial presence status
    pub fn into_user(self, id: UserId, status: PresenceStatus) -> User {
        let mut user = User::new(id, self.name, self.email, status);
        user.level = self.level;
        user.github_link = self.github_link;
        user
    }
}

/// Partial profile edit; `None` leaves the field as is
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub level: Option<String>,
    pub github_link: Option<String>,
}
