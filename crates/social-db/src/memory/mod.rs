//! In-process store implementing every port
//!
//! Backs tests and local runs without Postgres. All state sits behind one
//! async mutex; a unit of work holds the lock from `begin` until it is
//! committed or dropped, so units of work are fully serialized. Uncommitted
//! writes are reverted from an undo log when the unit of work is dropped.

mod state;
mod unit_of_work;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::instrument;

use social_core::entities::{Comment, Post, TargetRef, User, Vote};
use social_core::error::DomainError;
use social_core::traits::{
    CommentRepository, PostRepository, RepoResult, TransactionalStore, UnitOfWork, UserRepository,
};
use social_core::value_objects::{CommentId, Counters, PostId, UserId};

use self::state::State;
pub use self::unit_of_work::MemoryUnitOfWork;

/// Faults injected into subsequent units of work
#[derive(Debug, Default)]
pub(crate) struct Faults {
    insert_conflicts: AtomicU32,
    delta_failures: AtomicU32,
}

impl Faults {
    /// Consume one pending fault from `counter`, if any
    fn take(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    pub(crate) fn take_insert_conflict(&self) -> bool {
        Self::take(&self.insert_conflicts)
    }

    pub(crate) fn take_delta_failure(&self) -> bool {
        Self::take(&self.delta_failures)
    }
}

/// In-memory implementation of the repositories and the transactional store
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
    faults: Arc<Faults>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` vote inserts fail as if another writer won the race
    pub fn inject_insert_conflicts(&self, n: u32) {
        self.faults.insert_conflicts.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` counter updates fail with a database error
    pub fn inject_delta_failures(&self, n: u32) {
        self.faults.delta_failures.store(n, Ordering::SeqCst);
    }

    /// Number of stored reactions on a target with the given vote
    pub async fn count_votes(&self, target: TargetRef, vote: Vote) -> usize {
        let state = self.state.lock().await;
        state
            .reactions
            .iter()
            .filter(|((_, t), v)| *t == target && **v == vote)
            .count()
    }

    /// Total number of stored reaction records
    pub async fn reaction_count(&self) -> usize {
        self.state.lock().await.reactions.len()
    }
}

#[async_trait]
impl TransactionalStore for MemoryStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(MemoryUnitOfWork::new(guard, Arc::clone(&self.faults))))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        let state = self.state.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).map(|(user, _)| user.clone()))
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn count(&self) -> RepoResult<i64> {
        let state = self.state.lock().await;
        Ok(state.users.len() as i64)
    }

    async fn list(&self, query: Option<&str>) -> RepoResult<Vec<User>> {
        let needle = query.map(str::to_lowercase);
        let state = self.state.lock().await;
        let mut users: Vec<User> = state
            .users
            .values()
            .map(|(user, _)| user)
            .filter(|user| {
                needle
                    .as_deref()
                    .map_or(true, |n| user.username.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        users.sort_by_key(|user| (user.created_at, user.id));
        Ok(users)
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).map(|(_, hash)| hash.clone()))
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let state = self.state.lock().await;
        Ok(state.posts.get(&id).cloned())
    }

    async fn list(&self, query: Option<&str>) -> RepoResult<Vec<Post>> {
        let needle = query.map(str::to_lowercase);
        let state = self.state.lock().await;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|post| {
                needle
                    .as_deref()
                    .map_or(true, |n| post.content.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(posts)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&post.creator_id) {
            return Err(DomainError::UserNotFound(post.creator_id));
        }
        let mut stored = post.clone();
        stored.set_counters(Counters::for_post());
        state.posts.insert(post.id, stored);
        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update_content(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let stored = state
            .posts
            .get_mut(&post.id)
            .ok_or(DomainError::PostNotFound(post.id))?;
        stored.content.clone_from(&post.content);
        stored.updated_at = post.updated_at;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> RepoResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.remove_post(id))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let state = self.state.lock().await;
        Ok(state.comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        let state = self.state.lock().await;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| (comment.created_at, comment.id));
        Ok(comments)
    }
}
