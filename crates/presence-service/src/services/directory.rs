//! User directory: everyone except the caller

use presence_core::UserId;
use tracing::instrument;

use crate::dto::{DirectoryResponse, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct DirectoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DirectoryService<'a> {
    /// Create a directory service over the context
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All known users except `caller`, ascending by id. Read-only.
    #[instrument(skip(self))]
    pub async fn list_others(&self, caller: UserId) -> ServiceResult<DirectoryResponse> {
        let users = self.ctx.user_repo().list_except(caller).await?;
        Ok(DirectoryResponse::new(
            users.iter().map(UserResponse::from).collect(),
        ))
    }
}
