//! Entity to DTO mappers

use presence_core::User;

use super::responses::{CurrentUserResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            level: user.level.clone(),
            github_link: user.github_link.clone(),
            status: user.status,
            busy: user.is_busy(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            level: user.level.clone(),
            github_link: user.github_link.clone(),
            status: user.status,
            busy: user.is_busy(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
