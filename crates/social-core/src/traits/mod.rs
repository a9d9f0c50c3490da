//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    CommentRepository, CommentWriter, CounterStore, PostRepository, ReactionStore, RepoResult,
    TransactionalStore, UnitOfWork, UserRepository,
};
