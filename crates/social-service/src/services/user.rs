//! User service
//!
//! Account lookups for the current user and the admin listing.

use social_core::value_objects::UserId;
use tracing::instrument;

use crate::dto::UserResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The acting user's own account
    #[instrument(skip(self))]
    pub async fn current(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        let user = PermissionService::new(self.ctx).actor(user_id).await?;
        Ok(UserResponse::from(user))
    }

    /// All accounts, optionally filtered by username (admin only)
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: UserId,
        query: Option<&str>,
    ) -> ServiceResult<Vec<UserResponse>> {
        PermissionService::new(self.ctx).require_admin(user_id).await?;

        let users = self.ctx.user_repo().list(query).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }
}
