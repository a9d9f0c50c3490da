//! PostgreSQL unit of work
//!
//! Every unit of work is one database transaction. The transaction sets a
//! local `lock_timeout` so a blocked row lock surfaces as `StoreBusy` instead
//! of waiting forever. Dropping a [`PgUnitOfWork`] without committing rolls
//! the transaction back.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};
use uuid::Uuid;

use social_core::entities::{Comment, TargetKind, TargetRef, Vote};
use social_core::error::DomainError;
use social_core::traits::{
    CommentWriter, CounterStore, ReactionStore, RepoResult, TransactionalStore, UnitOfWork,
};
use social_core::value_objects::{CommentId, CounterDelta, Counters, PostId, UserId};

use crate::mappers::tables_for;
use crate::models::CountersModel;

use super::error::{map_db_error, map_unique_violation};

/// Transactional store backed by a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    lock_timeout: Duration,
}

impl PgStore {
    /// Create a new PgStore
    pub fn new(pool: PgPool, lock_timeout: Duration) -> Self {
        Self { pool, lock_timeout }
    }
}

#[async_trait]
impl TransactionalStore for PgStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SELECT set_config('lock_timeout', $1, true)")
            .bind(format!("{}ms", self.lock_timeout.as_millis()))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        Ok(Box::new(PgUnitOfWork { tx }))
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

/// One open transaction
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

fn stored_vote(raw: i16) -> RepoResult<Vote> {
    Vote::from_i16(raw)
        .ok_or_else(|| DomainError::InternalError(format!("invalid stored vote {raw}")))
}

#[async_trait]
impl ReactionStore for PgUnitOfWork {
    #[instrument(skip(self), fields(target = %target))]
    async fn find_vote_for_update(
        &mut self,
        user_id: UserId,
        target: TargetRef,
    ) -> RepoResult<Option<Vote>> {
        let t = tables_for(target.kind);
        let sql = format!(
            "SELECT vote FROM {} WHERE user_id = $1 AND {} = $2 FOR UPDATE",
            t.reactions, t.fk
        );

        let raw = sqlx::query_scalar::<_, i16>(&sql)
            .bind(user_id.into_inner())
            .bind(target.id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        raw.map(stored_vote).transpose()
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn insert_vote(&mut self, user_id: UserId, target: TargetRef, vote: Vote) -> RepoResult<()> {
        let t = tables_for(target.kind);
        let sql = format!(
            "INSERT INTO {} (user_id, {}, vote) VALUES ($1, $2, $3)",
            t.reactions, t.fk
        );

        sqlx::query(&sql)
            .bind(user_id.into_inner())
            .bind(target.id)
            .bind(vote.as_i16())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::ReactionConflict))?;

        Ok(())
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn update_vote(&mut self, user_id: UserId, target: TargetRef, vote: Vote) -> RepoResult<()> {
        let t = tables_for(target.kind);
        let sql = format!(
            "UPDATE {} SET vote = $3 WHERE user_id = $1 AND {} = $2",
            t.reactions, t.fk
        );

        let result = sqlx::query(&sql)
            .bind(user_id.into_inner())
            .bind(target.id)
            .bind(vote.as_i16())
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InternalError(format!(
                "no vote to update on {target}"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn delete_vote(&mut self, user_id: UserId, target: TargetRef) -> RepoResult<()> {
        let t = tables_for(target.kind);
        let sql = format!("DELETE FROM {} WHERE user_id = $1 AND {} = $2", t.reactions, t.fk);

        let result = sqlx::query(&sql)
            .bind(user_id.into_inner())
            .bind(target.id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InternalError(format!(
                "no vote to delete on {target}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CounterStore for PgUnitOfWork {
    #[instrument(skip(self), fields(target = %target))]
    async fn read_counters(&mut self, target: TargetRef) -> RepoResult<Option<Counters>> {
        let t = tables_for(target.kind);
        // KEY SHARE keeps the row from being deleted under us without
        // blocking the counter UPDATEs of other transactions
        let sql = format!(
            "SELECT like_count, dislike_count, {} AS comment_count FROM {} WHERE id = $1 FOR KEY SHARE",
            t.comment_count, t.target
        );

        let row = sqlx::query_as::<_, CountersModel>(&sql)
            .bind(target.id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Counters::from))
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn apply_delta(&mut self, target: TargetRef, delta: CounterDelta) -> RepoResult<Counters> {
        let query = match target.kind {
            TargetKind::Post => sqlx::query_as::<_, CountersModel>(
                r"
                UPDATE posts
                SET like_count = like_count + $2,
                    dislike_count = dislike_count + $3,
                    comment_count = comment_count + $4
                WHERE id = $1
                RETURNING like_count, dislike_count, comment_count
                ",
            )
            .bind(target.id)
            .bind(delta.like)
            .bind(delta.dislike)
            .bind(delta.comment),
            TargetKind::Comment => {
                if delta.comment != 0 {
                    return Err(DomainError::InternalError(
                        "comment delta applied to a comment".to_string(),
                    ));
                }
                sqlx::query_as::<_, CountersModel>(
                    r"
                    UPDATE comments
                    SET like_count = like_count + $2,
                        dislike_count = dislike_count + $3
                    WHERE id = $1
                    RETURNING like_count, dislike_count, NULL::BIGINT AS comment_count
                    ",
                )
                .bind(target.id)
                .bind(delta.like)
                .bind(delta.dislike)
            }
        };

        let row = query
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| DomainError::target_not_found(target))?;

        debug!(like = delta.like, dislike = delta.dislike, comment = delta.comment, "counters updated");
        Ok(Counters::from(row))
    }
}

#[async_trait]
impl CommentWriter for PgUnitOfWork {
    #[instrument(skip(self, comment), fields(comment_id = %comment.id, post_id = %comment.post_id))]
    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, creator_id, content, like_count, dislike_count,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, 0, 0, $5, $6)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.post_id.into_inner())
        .bind(comment.creator_id.into_inner())
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_comment(&mut self, id: CommentId) -> RepoResult<Option<PostId>> {
        let post_id = sqlx::query_scalar::<_, Uuid>("DELETE FROM comments WHERE id = $1 RETURNING post_id")
            .bind(id.into_inner())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(post_id.map(PostId::from_uuid))
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
