//! The caller's own profile

use presence_core::{DomainError, ProfileUpdate, UserId};
use tracing::{info, instrument};

use crate::dto::{CurrentUserResponse, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a user service over the context
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's own profile, email included
    #[instrument(skip(self))]
    pub async fn me(&self, caller: UserId) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(caller)
            .await?
            .ok_or(ServiceError::Domain(DomainError::UserNotFound(caller)))?;

        Ok(CurrentUserResponse::from(user))
    }

    /// Edit name, level or profile link. Presence is never touched here.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        caller: UserId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let update = ProfileUpdate {
            name: request.name.map(|n| n.trim().to_string()),
            level: request.level,
            github_link: request.github_link,
        };

        let user = self.ctx.user_repo().update_profile(caller, &update).await?;

        info!(user_id = %caller, "Profile updated");

        Ok(CurrentUserResponse::from(user))
    }
}
