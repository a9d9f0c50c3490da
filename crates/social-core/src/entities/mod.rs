//! Domain entities - core business objects

mod comment;
mod post;
mod reaction;
mod user;

pub use comment::Comment;
pub use post::{validate_content, Post, MAX_CONTENT_CHARS};
pub use reaction::{Reactable, Reaction, TargetKind, TargetRef, Vote};
pub use user::{User, UserRole};
