//! Post service
//!
//! Post CRUD. Counters are never written here; they only move through the
//! reaction engine and the comment cascade.

use social_core::entities::{validate_content, Post};
use social_core::error::DomainError;
use social_core::value_objects::{PostId, UserId};
use tracing::{info, instrument};

use crate::dto::{index_users, PostResponse, PostWithCreator};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a post
    #[instrument(skip(self, content))]
    pub async fn create(&self, user_id: UserId, content: String) -> ServiceResult<PostResponse> {
        let creator = PermissionService::new(self.ctx).actor(user_id).await?;
        validate_content(&content)?;

        let post = Post::new(creator.id, content);
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, "Post created");

        Ok(PostWithCreator {
            post,
            creator: Some(creator),
        }
        .into())
    }

    /// Get one post with its author
    #[instrument(skip(self))]
    pub async fn get(&self, post_id: PostId) -> ServiceResult<PostResponse> {
        let post = self.find(post_id).await?;
        let creator = self.ctx.user_repo().find_by_id(post.creator_id).await?;
        Ok(PostWithCreator { post, creator }.into())
    }

    /// Posts newest first, optionally filtered by content
    #[instrument(skip(self))]
    pub async fn list(&self, query: Option<&str>) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().list(query).await?;

        let mut creator_ids: Vec<UserId> = posts.iter().map(|p| p.creator_id).collect();
        creator_ids.sort_unstable();
        creator_ids.dedup();
        let creators = index_users(self.ctx.user_repo().find_by_ids(&creator_ids).await?);

        Ok(posts
            .into_iter()
            .map(|post| {
                let creator = creators.get(&post.creator_id).cloned();
                PostWithCreator { post, creator }.into()
            })
            .collect())
    }

    /// Replace the content of a post (creator only)
    #[instrument(skip(self, content))]
    pub async fn edit(
        &self,
        user_id: UserId,
        post_id: PostId,
        content: String,
    ) -> ServiceResult<PostResponse> {
        let mut post = self.find(post_id).await?;
        let creator = PermissionService::new(self.ctx)
            .require_author(user_id, post.creator_id)
            .await?;
        validate_content(&content)?;

        post.edit(content);
        self.ctx.post_repo().update_content(&post).await?;

        info!(post_id = %post_id, "Post edited");

        // Counters may have moved since the read above
        let post = self.find(post_id).await?;
        Ok(PostWithCreator {
            post,
            creator: Some(creator),
        }
        .into())
    }

    /// Delete a post with its comments and reactions (creator or admin)
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId, post_id: PostId) -> ServiceResult<()> {
        let post = self.find(post_id).await?;
        PermissionService::new(self.ctx)
            .require_author_or_admin(user_id, post.creator_id)
            .await?;

        if !self.ctx.post_repo().delete(post_id).await? {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    async fn find(&self, post_id: PostId) -> ServiceResult<Post> {
        Ok(self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?)
    }
}
