//! User entity <-> model mapper

use presence_core::{PresenceStatus, User, UserId};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            name: model.name,
            email: model.email,
            level: model.level,
            github_link: model.github_link,
            status: PresenceStatus::from_busy(model.busy),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Column values for inserting a user row
pub struct UserInsert<'a> {
    pub id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub encrypted_password: &'a str,
    pub busy: bool,
    pub level: Option<&'a str>,
    pub github_link: Option<&'a str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, encrypted_password: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            name: &user.name,
            email: &user.email,
            encrypted_password,
            busy: user.status.is_busy(),
            level: user.level.as_deref(),
            github_link: user.github_link.as_deref(),
        }
    }
}
