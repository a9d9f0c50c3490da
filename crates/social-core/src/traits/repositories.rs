//! Repository traits (ports) - define the interface for data access
//!
//! Plain reads and content CRUD go through the per-entity repositories.
//! Everything that touches counters or reaction records goes through a
//! [`UnitOfWork`] obtained from a [`TransactionalStore`], so the reaction
//! mutation and the counter delta always commit or roll back together.

use async_trait::async_trait;

use crate::entities::{Comment, Post, TargetRef, User, Vote};
use crate::error::DomainError;
use crate::value_objects::{CommentId, CounterDelta, Counters, PostId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find several users at once (missing ids are skipped)
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Number of registered users
    async fn count(&self) -> RepoResult<i64>;

    /// List users, optionally filtered by a username substring
    async fn list(&self, query: Option<&str>) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// List posts newest first, optionally filtered by a content substring
    async fn list(&self, query: Option<&str>) -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Persist the content of an existing post (counters are never written)
    async fn update_content(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post with its comments and reactions
    async fn delete(&self, id: PostId) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// List comments of a post, oldest first
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;
}

// ============================================================================
// Unit of work
// ============================================================================

/// Current vote per (user, target)
#[async_trait]
pub trait ReactionStore: Send {
    /// Read the stored vote, locking the record until the unit of work ends
    async fn find_vote_for_update(
        &mut self,
        user_id: UserId,
        target: TargetRef,
    ) -> RepoResult<Option<Vote>>;

    /// Insert a vote; a concurrent insert for the same pair fails with `ReactionConflict`
    async fn insert_vote(&mut self, user_id: UserId, target: TargetRef, vote: Vote)
        -> RepoResult<()>;

    /// Flip an existing vote
    async fn update_vote(&mut self, user_id: UserId, target: TargetRef, vote: Vote)
        -> RepoResult<()>;

    /// Remove a vote
    async fn delete_vote(&mut self, user_id: UserId, target: TargetRef) -> RepoResult<()>;
}

/// Denormalized counters on posts and comments
#[async_trait]
pub trait CounterStore: Send {
    /// Read the counters of a target, `None` if it does not exist
    async fn read_counters(&mut self, target: TargetRef) -> RepoResult<Option<Counters>>;

    /// Atomically add `delta` to the target's counters and return the new values
    async fn apply_delta(&mut self, target: TargetRef, delta: CounterDelta)
        -> RepoResult<Counters>;
}

/// Comment record writes that must share a transaction with the post counter
#[async_trait]
pub trait CommentWriter: Send {
    async fn insert_comment(&mut self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment, returning the post it belonged to if it existed
    async fn delete_comment(&mut self, id: CommentId) -> RepoResult<Option<PostId>>;
}

/// One atomic scope over the reaction, counter and comment stores
///
/// Dropping a unit of work without calling [`UnitOfWork::commit`] rolls back
/// every write made through it.
#[async_trait]
pub trait UnitOfWork: ReactionStore + CounterStore + CommentWriter + Send {
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}

/// Factory for units of work
#[async_trait]
pub trait TransactionalStore: Send + Sync {
    /// Start a new unit of work
    async fn begin(&self) -> RepoResult<Box<dyn UnitOfWork>>;

    /// Check the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}
