//! Repository implementations
//!
//! PostgreSQL implementations of the repository and unit-of-work traits
//! defined in social-core.

mod comment;
mod error;
mod post;
mod store;
mod user;

pub use comment::PgCommentRepository;
pub use error::{map_db_error, map_unique_violation};
pub use post::PgPostRepository;
pub use store::{PgStore, PgUnitOfWork};
pub use user::PgUserRepository;
