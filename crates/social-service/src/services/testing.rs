//! Shared fixtures for service tests

use std::sync::Arc;

use social_common::auth::JwtService;
use social_common::config::ReactionConfig;
use social_core::entities::{Post, TargetRef, User, UserRole};
use social_core::traits::{PostRepository, TransactionalStore, UserRepository};
use social_core::value_objects::Counters;
use social_db::MemoryStore;

use super::context::ServiceContext;

pub(crate) const TEST_SECRET: &str = "test-secret-key-for-services";

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub ctx: ServiceContext,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_attempts(3)
    }

    pub fn with_attempts(max_attempts: u32) -> Self {
        let store = MemoryStore::new();
        let ctx = ServiceContext::in_memory(
            store.clone(),
            Arc::new(JwtService::new(TEST_SECRET, 3600)),
            ReactionConfig { max_attempts },
        );
        Self { store, ctx }
    }

    pub async fn user(&self, name: &str) -> User {
        self.user_with_role(name, UserRole::Normal).await
    }

    pub async fn admin(&self, name: &str) -> User {
        self.user_with_role(name, UserRole::Admin).await
    }

    async fn user_with_role(&self, name: &str, role: UserRole) -> User {
        let user = User::new(name.to_string(), format!("{name}@example.com"), role);
        UserRepository::create(&self.store, &user, "not-a-real-hash")
            .await
            .unwrap();
        user
    }

    pub async fn post(&self, creator: &User, content: &str) -> Post {
        let post = Post::new(creator.id, content.to_string());
        PostRepository::create(&self.store, &post).await.unwrap();
        post
    }

    /// Committed counters of a target
    pub async fn counters(&self, target: TargetRef) -> Counters {
        let mut uow = self.store.begin().await.unwrap();
        uow.read_counters(target).await.unwrap().unwrap()
    }
}
