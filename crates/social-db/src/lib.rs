//! # social-db
//!
//! Persistence layer implementing the social-core ports.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Postgres repositories and the transactional [`PgStore`]
//! - [`MemoryStore`], an in-process implementation of the same ports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use social_db::pool::{create_pool, run_migrations, PoolConfig};
//! use social_db::PgStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let store = PgStore::new(pool, Duration::from_secs(5));
//!
//!     // Hand the store to the service layer...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryStore, MemoryUnitOfWork};
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgCommentRepository, PgPostRepository, PgStore, PgUnitOfWork, PgUserRepository,
};
