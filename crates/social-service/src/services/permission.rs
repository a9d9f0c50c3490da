//! Permission service
//!
//! Resolves the acting user and checks ownership and admin rules.

use social_core::entities::User;
use social_core::error::DomainError;
use social_core::value_objects::UserId;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load the acting user
    ///
    /// A nil id or an account that no longer exists is `Unauthorized`.
    #[instrument(skip(self))]
    pub async fn actor(&self, user_id: UserId) -> ServiceResult<User> {
        if user_id.is_nil() {
            return Err(DomainError::Unauthorized.into());
        }

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized.into())
    }

    /// Require the administrator role
    #[instrument(skip(self))]
    pub async fn require_admin(&self, user_id: UserId) -> ServiceResult<User> {
        let actor = self.actor(user_id).await?;
        if !actor.is_admin() {
            debug!(user_id = %user_id, "Admin role required");
            return Err(DomainError::AdminOnly.into());
        }
        Ok(actor)
    }

    /// Require that the actor created the resource
    #[instrument(skip(self))]
    pub async fn require_author(&self, user_id: UserId, creator_id: UserId) -> ServiceResult<User> {
        let actor = self.actor(user_id).await?;
        if actor.id != creator_id {
            debug!(user_id = %user_id, creator_id = %creator_id, "Not the author");
            return Err(DomainError::NotAuthor.into());
        }
        Ok(actor)
    }

    /// Require that the actor created the resource or is an administrator
    #[instrument(skip(self))]
    pub async fn require_author_or_admin(
        &self,
        user_id: UserId,
        creator_id: UserId,
    ) -> ServiceResult<User> {
        let actor = self.actor(user_id).await?;
        if actor.id != creator_id && !actor.is_admin() {
            debug!(user_id = %user_id, creator_id = %creator_id, "Neither author nor admin");
            return Err(DomainError::NotAuthor.into());
        }
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Fixture;
    use crate::services::ServiceError;

    #[tokio::test]
    async fn test_unknown_actor_is_unauthorized() {
        let fx = Fixture::new();
        let permissions = PermissionService::new(&fx.ctx);

        let err = permissions.actor(UserId::new()).await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = permissions.actor(UserId::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_author_and_admin_rules() {
        let fx = Fixture::new();
        let author = fx.user("author").await;
        let other = fx.user("other").await;
        let admin = fx.admin("admin").await;
        let permissions = PermissionService::new(&fx.ctx);

        assert!(permissions.require_author(author.id, author.id).await.is_ok());
        assert!(permissions.require_author(admin.id, author.id).await.is_err());
        assert!(permissions.require_author_or_admin(admin.id, author.id).await.is_ok());

        let err = permissions
            .require_author_or_admin(other.id, author.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotAuthor)));
        assert_eq!(err.status_code(), 403);

        let err = permissions.require_admin(other.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::AdminOnly)));
    }
}
