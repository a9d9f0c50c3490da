//! Service context - dependency container for services
//!
//! Holds the repositories, the transactional store and the JWT service.
//! Built once at startup and passed explicitly to every service.

use std::sync::Arc;
use std::time::Duration;

use social_common::auth::JwtService;
use social_common::config::ReactionConfig;
use social_core::traits::{
    CommentRepository, PostRepository, TransactionalStore, UserRepository,
};
use social_db::{
    MemoryStore, PgCommentRepository, PgPool, PgPostRepository, PgStore, PgUserRepository,
};

/// Service context containing all dependencies
///
/// It provides access to:
/// - Read/CRUD repositories for users, posts and comments
/// - The transactional store handing out units of work
/// - JWT service for authentication
/// - Reaction engine tuning
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    // Units of work
    store: Arc<dyn TransactionalStore>,

    // Services
    jwt_service: Arc<JwtService>,
    reactions: ReactionConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        store: Arc<dyn TransactionalStore>,
        jwt_service: Arc<JwtService>,
        reactions: ReactionConfig,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
            store,
            jwt_service,
            reactions,
        }
    }

    /// Wire every port to Postgres
    pub fn postgres(
        pool: PgPool,
        lock_timeout: Duration,
        jwt_service: Arc<JwtService>,
        reactions: ReactionConfig,
    ) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgPostRepository::new(pool.clone())),
            Arc::new(PgCommentRepository::new(pool.clone())),
            Arc::new(PgStore::new(pool, lock_timeout)),
            jwt_service,
            reactions,
        )
    }

    /// Wire every port to one shared in-memory store
    pub fn in_memory(
        store: MemoryStore,
        jwt_service: Arc<JwtService>,
        reactions: ReactionConfig,
    ) -> Self {
        let store = Arc::new(store);
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            jwt_service,
            reactions,
        )
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the transactional store
    pub fn store(&self) -> &dyn TransactionalStore {
        self.store.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Attempts per toggle before a conflict is reported
    pub fn reaction_max_attempts(&self) -> u32 {
        self.reactions.max_attempts.max(1)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("store", &"dyn TransactionalStore")
            .field("reactions", &self.reactions)
            .finish_non_exhaustive()
    }
}
