//! Presence toggle
//!
//! The toggle is a single atomic write in the store; broadcasting the new
//! status afterwards is best-effort and never fails the request.

use presence_core::{DomainError, DomainEvent, User, UserId};
use tracing::{debug, error, info, instrument, warn};

use crate::dto::PresenceResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a presence service over the context
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flip the caller between available and busy
    ///
    /// # Errors
    /// `UserNotFound` when the caller's record is gone; `DatabaseError` when
    /// the write fails. Neither is retried.
    #[instrument(skip(self))]
    pub async fn toggle(&self, caller: UserId) -> ServiceResult<PresenceResponse> {
        let user = match self.ctx.user_repo().toggle_presence(caller).await {
            Ok(user) => user,
            Err(e @ DomainError::UserNotFound(_)) => {
                error!(user_id = %caller, "Presence toggle for a missing user");
                return Err(e.into());
            }
            Err(e) => {
                error!(user_id = %caller, error = %e, "Presence toggle failed");
                return Err(e.into());
            }
        };

        info!(user_id = %caller, status = %user.status, "Presence toggled");

        self.broadcast(&user).await;

        Ok(PresenceResponse::new(user.id, user.status, user.updated_at))
    }

    /// The caller's current status
    #[instrument(skip(self))]
    pub async fn current(&self, caller: UserId) -> ServiceResult<PresenceResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(caller)
            .await?
            .ok_or(ServiceError::Domain(DomainError::UserNotFound(caller)))?;

        Ok(PresenceResponse::new(user.id, user.status, user.updated_at))
    }

    /// Publish the row exactly as the toggle wrote it
    async fn broadcast(&self, user: &User) {
        let Some(publisher) = self.ctx.publisher() else {
            return;
        };

        match publisher.publish(&DomainEvent::presence_updated(user)).await {
            Ok(receivers) => debug!(user_id = %user.id, receivers, "Presence broadcast"),
            Err(e) => warn!(user_id = %user.id, error = %e, "Presence broadcast failed"),
        }
    }
}
