//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Post;
use social_core::error::DomainError;
use social_core::traits::{PostRepository, RepoResult};
use social_core::value_objects::PostId;

use crate::models::PostModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, creator_id, content, like_count, dislike_count, comment_count,
                   created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: Option<&str>) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, creator_id, content, like_count, dislike_count, comment_count,
                   created_at, updated_at
            FROM posts
            WHERE $1::TEXT IS NULL OR strpos(lower(content), lower($1)) > 0
            ORDER BY created_at DESC
            ",
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, creator_id, content, like_count, dislike_count, comment_count,
                               created_at, updated_at)
            VALUES ($1, $2, $3, 0, 0, 0, $4, $5)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.creator_id.into_inner())
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update_content(&self, post: &Post) -> RepoResult<()> {
        // Counter columns are owned by the unit of work and never written here
        let result = sqlx::query(
            r"
            UPDATE posts
            SET content = $2, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.content)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
