//! Unit of work over the in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, instrument};

use social_core::entities::{Comment, TargetRef, Vote};
use social_core::error::DomainError;
use social_core::traits::{CommentWriter, CounterStore, ReactionStore, RepoResult, UnitOfWork};
use social_core::value_objects::{CommentId, CounterDelta, Counters, PostId, UserId};

use super::state::{State, VoteKey};
use super::Faults;

/// Inverse of one write, replayed on rollback
#[derive(Debug)]
enum Undo {
    Vote(VoteKey, Option<Vote>),
    Counters(TargetRef, Counters),
    InsertedComment(CommentId),
    RemovedComment(Comment, Vec<(VoteKey, Vote)>),
}

/// Exclusive handle on the store until committed or dropped
pub struct MemoryUnitOfWork {
    state: OwnedMutexGuard<State>,
    faults: Arc<Faults>,
    undo: Vec<Undo>,
    committed: bool,
}

impl MemoryUnitOfWork {
    pub(crate) fn new(state: OwnedMutexGuard<State>, faults: Arc<Faults>) -> Self {
        Self {
            state,
            faults,
            undo: Vec::new(),
            committed: false,
        }
    }

    fn rollback(&mut self) {
        while let Some(entry) = self.undo.pop() {
            match entry {
                Undo::Vote(key, Some(vote)) => {
                    self.state.reactions.insert(key, vote);
                }
                Undo::Vote(key, None) => {
                    self.state.reactions.remove(&key);
                }
                Undo::Counters(target, counters) => {
                    self.state.set_counters(target, counters);
                }
                Undo::InsertedComment(id) => {
                    self.state.comments.remove(&id);
                }
                Undo::RemovedComment(comment, votes) => {
                    self.state.comments.insert(comment.id, comment);
                    self.state.reactions.extend(votes);
                }
            }
        }
    }

    fn record_vote(&mut self, key: VoteKey, vote: Option<Vote>) {
        let previous = match vote {
            Some(vote) => self.state.reactions.insert(key, vote),
            None => self.state.reactions.remove(&key),
        };
        self.undo.push(Undo::Vote(key, previous));
    }

    fn ensure_target(&self, target: TargetRef) -> RepoResult<()> {
        if self.state.counters(target).is_some() {
            Ok(())
        } else {
            Err(DomainError::target_not_found(target))
        }
    }
}

impl Drop for MemoryUnitOfWork {
    fn drop(&mut self) {
        if !self.committed && !self.undo.is_empty() {
            debug!(writes = self.undo.len(), "rolling back uncommitted unit of work");
            self.rollback();
        }
    }
}

#[async_trait]
impl ReactionStore for MemoryUnitOfWork {
    async fn find_vote_for_update(
        &mut self,
        user_id: UserId,
        target: TargetRef,
    ) -> RepoResult<Option<Vote>> {
        Ok(self.state.reactions.get(&(user_id, target)).copied())
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn insert_vote(&mut self, user_id: UserId, target: TargetRef, vote: Vote) -> RepoResult<()> {
        if self.faults.take_insert_conflict() || self.state.reactions.contains_key(&(user_id, target)) {
            return Err(DomainError::ReactionConflict);
        }
        if !self.state.users.contains_key(&user_id) {
            return Err(DomainError::UserNotFound(user_id));
        }
        self.ensure_target(target)?;

        self.record_vote((user_id, target), Some(vote));
        Ok(())
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn update_vote(&mut self, user_id: UserId, target: TargetRef, vote: Vote) -> RepoResult<()> {
        if !self.state.reactions.contains_key(&(user_id, target)) {
            return Err(DomainError::InternalError(format!("no vote to update on {target}")));
        }
        self.record_vote((user_id, target), Some(vote));
        Ok(())
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn delete_vote(&mut self, user_id: UserId, target: TargetRef) -> RepoResult<()> {
        if !self.state.reactions.contains_key(&(user_id, target)) {
            return Err(DomainError::InternalError(format!("no vote to delete on {target}")));
        }
        self.record_vote((user_id, target), None);
        Ok(())
    }
}

#[async_trait]
impl CounterStore for MemoryUnitOfWork {
    async fn read_counters(&mut self, target: TargetRef) -> RepoResult<Option<Counters>> {
        Ok(self.state.counters(target))
    }

    #[instrument(skip(self), fields(target = %target))]
    async fn apply_delta(&mut self, target: TargetRef, delta: CounterDelta) -> RepoResult<Counters> {
        if self.faults.take_delta_failure() {
            return Err(DomainError::DatabaseError("injected counter failure".to_string()));
        }

        let current = self
            .state
            .counters(target)
            .ok_or_else(|| DomainError::target_not_found(target))?;
        let next = current.apply(delta)?;

        self.state.set_counters(target, next);
        self.undo.push(Undo::Counters(target, current));
        Ok(next)
    }
}

#[async_trait]
impl CommentWriter for MemoryUnitOfWork {
    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()> {
        if !self.state.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        if self.state.comments.contains_key(&comment.id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate comment id {}",
                comment.id
            )));
        }

        let mut stored = comment.clone();
        stored.like_count = 0;
        stored.dislike_count = 0;
        self.state.comments.insert(comment.id, stored);
        self.undo.push(Undo::InsertedComment(comment.id));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_comment(&mut self, id: CommentId) -> RepoResult<Option<PostId>> {
        let Some((comment, votes)) = self.state.remove_comment(id) else {
            return Ok(None);
        };
        let post_id = comment.post_id;
        self.undo.push(Undo::RemovedComment(comment, votes));
        Ok(Some(post_id))
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let mut this = self;
        this.committed = true;
        this.undo.clear();
        Ok(())
    }
}
