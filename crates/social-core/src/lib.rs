//! # social-core
//!
//! Domain layer containing entities, value objects, the reaction toggle
//! state machine and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod toggle;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    validate_content, Comment, Post, Reactable, Reaction, TargetKind, TargetRef, User, UserRole,
    Vote, MAX_CONTENT_CHARS,
};
pub use error::DomainError;
pub use toggle::{ReactionOp, Transition};
pub use traits::{
    CommentRepository, CommentWriter, CounterStore, PostRepository, ReactionStore, RepoResult,
    TransactionalStore, UnitOfWork, UserRepository,
};
pub use value_objects::{CommentId, CounterDelta, Counters, IdParseError, PostId, UserId};
