//! Comment-count cascade
//!
//! Keeps `comment_count` on the owning post in step with comment records.
//! Both hooks run inside the caller's unit of work, next to the comment
//! insert or delete, and only ever issue a counter delta.

use social_core::entities::TargetRef;
use social_core::error::DomainError;
use social_core::traits::{RepoResult, UnitOfWork};
use social_core::value_objects::{CounterDelta, PostId};
use tracing::{debug, instrument};

/// Count a new comment on `post_id`, returning the post's new comment count
///
/// # Errors
/// `PostNotFound` if the post does not exist.
#[instrument(skip(uow))]
pub async fn on_comment_created(uow: &mut dyn UnitOfWork, post_id: PostId) -> RepoResult<i64> {
    let target = TargetRef::post(post_id);
    if uow.read_counters(target).await?.is_none() {
        return Err(DomainError::PostNotFound(post_id));
    }

    let counters = uow.apply_delta(target, CounterDelta::comments(1)).await?;
    let comment_count = counters.comment_count.unwrap_or_default();
    debug!(comment_count, "Comment counted");
    Ok(comment_count)
}

/// Uncount a removed comment
///
/// `post_id` is what the delete reported; `None` means no comment was removed
/// and nothing is written.
#[instrument(skip(uow))]
pub async fn on_comment_removed(
    uow: &mut dyn UnitOfWork,
    post_id: Option<PostId>,
) -> RepoResult<Option<i64>> {
    let Some(post_id) = post_id else {
        return Ok(None);
    };

    let counters = uow
        .apply_delta(TargetRef::post(post_id), CounterDelta::comments(-1))
        .await?;
    let comment_count = counters.comment_count.unwrap_or_default();
    debug!(comment_count, "Comment uncounted");
    Ok(Some(comment_count))
}
