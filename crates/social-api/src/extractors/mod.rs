//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path ids and search.

mod auth;
mod path;
mod search;
mod validated;

pub use auth::AuthUser;
pub use path::{CommentIdPath, PostIdPath};
pub use search::Search;
pub use validated::{JsonBody, ValidatedJson};
