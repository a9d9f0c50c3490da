//! Reaction service
//!
//! Applies like/dislike toggles on posts and comments. Each request runs in a
//! single unit of work: the current vote is read with a lock, the transition
//! is computed, the reaction record and the target counters are written, and
//! everything commits together. A losing racer on the first insert rolls back
//! and is retried from scratch.

use std::time::Duration;

use serde::Serialize;
use social_core::entities::{Reactable, TargetRef, Vote};
use social_core::error::DomainError;
use social_core::toggle::{ReactionOp, Transition};
use social_core::traits::RepoResult;
use social_core::value_objects::{CommentId, Counters, PostId, UserId};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Base delay between attempts; multiplied by the attempt number
const RETRY_BACKOFF: Duration = Duration::from_millis(10);

/// Like/dislike totals of a target after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionCounts {
    pub like_count: i64,
    pub dislike_count: i64,
}

impl From<Counters> for ReactionCounts {
    fn from(counters: Counters) -> Self {
        Self {
            like_count: counters.like_count,
            dislike_count: counters.dislike_count,
        }
    }
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle `vote` for `user_id` on `target` and return the new totals
    ///
    /// # Errors
    /// - `Unauthorized` for a nil user id
    /// - `PostNotFound` / `CommentNotFound` when the target does not exist
    /// - `ReactionConflict` when every attempt lost a write race
    #[instrument(skip(self), fields(target = %target))]
    pub async fn apply_reaction(
        &self,
        user_id: UserId,
        target: TargetRef,
        vote: Vote,
    ) -> ServiceResult<ReactionCounts> {
        if user_id.is_nil() {
            return Err(DomainError::Unauthorized.into());
        }

        let max_attempts = self.ctx.reaction_max_attempts();
        let mut attempt = 1;

        loop {
            match self.toggle_once(user_id, target, vote).await {
                Ok((transition, counters)) => {
                    info!(
                        user_id = %user_id,
                        op = ?transition.op,
                        next = ?transition.next,
                        like_count = counters.like_count,
                        dislike_count = counters.dislike_count,
                        attempt,
                        "Reaction applied"
                    );
                    return Ok(counters.into());
                }
                Err(DomainError::ReactionConflict) if attempt < max_attempts => {
                    warn!(user_id = %user_id, attempt, max_attempts, "Reaction write conflict, retrying");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    if matches!(e, DomainError::ReactionConflict) {
                        warn!(user_id = %user_id, attempts = attempt, "Reaction retries exhausted");
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// Toggle a vote on a post
    pub async fn react_to_post(
        &self,
        user_id: UserId,
        post_id: PostId,
        vote: Vote,
    ) -> ServiceResult<ReactionCounts> {
        self.apply_reaction(user_id, TargetRef::post(post_id), vote)
            .await
    }

    /// Toggle a vote on a comment
    pub async fn react_to_comment(
        &self,
        user_id: UserId,
        comment_id: CommentId,
        vote: Vote,
    ) -> ServiceResult<ReactionCounts> {
        self.apply_reaction(user_id, TargetRef::comment(comment_id), vote)
            .await
    }

    /// Toggle a vote on anything reactable that is already loaded
    pub async fn react_to<R: Reactable + Sync>(
        &self,
        user_id: UserId,
        item: &R,
        vote: Vote,
    ) -> ServiceResult<ReactionCounts> {
        self.apply_reaction(user_id, item.target(), vote).await
    }

    /// One attempt; the unit of work rolls back on every early return
    async fn toggle_once(
        &self,
        user_id: UserId,
        target: TargetRef,
        vote: Vote,
    ) -> RepoResult<(Transition, Counters)> {
        let mut uow = self.ctx.store().begin().await?;

        if uow.read_counters(target).await?.is_none() {
            return Err(DomainError::target_not_found(target));
        }

        let current = uow.find_vote_for_update(user_id, target).await?;
        let transition = Transition::compute(current, vote);

        match transition.op {
            ReactionOp::Insert(v) => uow.insert_vote(user_id, target, v).await?,
            ReactionOp::Update(v) => uow.update_vote(user_id, target, v).await?,
            ReactionOp::Delete => uow.delete_vote(user_id, target).await?,
        }

        let counters = uow.apply_delta(target, transition.delta).await?;
        uow.commit().await?;

        Ok((transition, counters))
    }
}
