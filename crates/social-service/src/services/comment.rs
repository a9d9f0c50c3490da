//! Comment service
//!
//! Creates, lists and deletes comments. Inserts and deletes share a unit of
//! work with the post's comment counter through the cascade hooks.

use social_core::entities::{validate_content, Comment};
use social_core::error::DomainError;
use social_core::value_objects::{CommentId, PostId, UserId};
use tracing::{info, instrument};

use crate::dto::{index_users, CommentResponse, CommentWithCreator};

use super::cascade;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment to a post and count it
    #[instrument(skip(self, content))]
    pub async fn create(
        &self,
        user_id: UserId,
        post_id: PostId,
        content: String,
    ) -> ServiceResult<CommentResponse> {
        let creator = PermissionService::new(self.ctx).actor(user_id).await?;
        validate_content(&content)?;

        let comment = Comment::new(post_id, creator.id, content);

        let mut uow = self.ctx.store().begin().await?;
        let comment_count = cascade::on_comment_created(uow.as_mut(), post_id).await?;
        uow.insert_comment(&comment).await?;
        uow.commit().await?;

        info!(comment_id = %comment.id, post_id = %post_id, comment_count, "Comment created");

        Ok(CommentWithCreator {
            comment,
            creator: Some(creator),
        }
        .into())
    }

    /// Comments of a post, oldest first
    #[instrument(skip(self))]
    pub async fn list(&self, post_id: PostId) -> ServiceResult<Vec<CommentResponse>> {
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        let mut creator_ids: Vec<UserId> = comments.iter().map(|c| c.creator_id).collect();
        creator_ids.sort_unstable();
        creator_ids.dedup();
        let creators = index_users(self.ctx.user_repo().find_by_ids(&creator_ids).await?);

        Ok(comments
            .into_iter()
            .map(|comment| {
                let creator = creators.get(&comment.creator_id).cloned();
                CommentWithCreator { comment, creator }.into()
            })
            .collect())
    }

    /// Delete a comment (creator or admin) and uncount it
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId, comment_id: CommentId) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        PermissionService::new(self.ctx)
            .require_author_or_admin(user_id, comment.creator_id)
            .await?;

        let mut uow = self.ctx.store().begin().await?;
        let removed_from = uow.delete_comment(comment_id).await?;
        let comment_count = cascade::on_comment_removed(uow.as_mut(), removed_from).await?;

        // Deleted concurrently after the lookup above
        let Some(comment_count) = comment_count else {
            return Err(DomainError::CommentNotFound(comment_id).into());
        };
        uow.commit().await?;

        info!(comment_id = %comment_id, post_id = %comment.post_id, comment_count, "Comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Fixture;
    use crate::services::ServiceError;
    use social_core::entities::TargetRef;

    #[tokio::test]
    async fn test_comment_count_follows_comments() {
        let fx = Fixture::new();
        let a = fx.user("alice").await;
        let post = fx.post(&a, "hello").await;
        let comments = CommentService::new(&fx.ctx);

        let mut created = Vec::new();
        for text in ["one", "two", "three"] {
            created.push(comments.create(a.id, post.id, text.to_string()).await.unwrap());
        }
        assert_eq!(fx.counters(TargetRef::post(post.id)).await.comment_count, Some(3));

        comments.delete(a.id, created[1].id).await.unwrap();
        assert_eq!(fx.counters(TargetRef::post(post.id)).await.comment_count, Some(2));

        let listed = comments.list(post.id).await.unwrap();
        let texts: Vec<&str> = listed.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(texts, ["one", "three"]);
        assert_eq!(listed[0].creator.as_ref().unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_create_on_missing_post() {
        let fx = Fixture::new();
        let a = fx.user("alice").await;

        let err = CommentService::new(&fx.ctx)
            .create(a.id, PostId::new(), "orphan".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_validates_content() {
        let fx = Fixture::new();
        let a = fx.user("alice").await;
        let post = fx.post(&a, "hello").await;
        let comments = CommentService::new(&fx.ctx);

        let err = comments.create(a.id, post.id, "x".repeat(281)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = comments.create(a.id, post.id, "   ".to_string()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        assert_eq!(fx.counters(TargetRef::post(post.id)).await.comment_count, Some(0));
    }

    #[tokio::test]
    async fn test_only_author_or_admin_can_delete() {
        let fx = Fixture::new();
        let author = fx.user("author").await;
        let other = fx.user("other").await;
        let admin = fx.admin("admin").await;
        let post = fx.post(&author, "hello").await;
        let comments = CommentService::new(&fx.ctx);

        let first = comments.create(author.id, post.id, "a".to_string()).await.unwrap();
        let second = comments.create(author.id, post.id, "b".to_string()).await.unwrap();

        let err = comments.delete(other.id, first.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotAuthor)));
        assert_eq!(fx.counters(TargetRef::post(post.id)).await.comment_count, Some(2));

        comments.delete(author.id, first.id).await.unwrap();
        comments.delete(admin.id, second.id).await.unwrap();
        assert_eq!(fx.counters(TargetRef::post(post.id)).await.comment_count, Some(0));
    }

    #[tokio::test]
    async fn test_delete_missing_comment() {
        let fx = Fixture::new();
        let a = fx.user("alice").await;

        let err = CommentService::new(&fx.ctx)
            .delete(a.id, CommentId::new())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_failed_cascade_leaves_no_comment() {
        let fx = Fixture::new();
        let a = fx.user("alice").await;
        let post = fx.post(&a, "hello").await;
        let comments = CommentService::new(&fx.ctx);

        fx.store.inject_delta_failures(1);
        assert!(comments.create(a.id, post.id, "lost".to_string()).await.is_err());

        assert!(comments.list(post.id).await.unwrap().is_empty());
        assert_eq!(fx.counters(TargetRef::post(post.id)).await.comment_count, Some(0));
    }
}
