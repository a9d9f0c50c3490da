//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod cascade;
pub mod comment;
pub mod context;
pub mod error;
pub mod permission;
pub mod post;
pub mod reaction;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use permission::PermissionService;
pub use post::PostService;
pub use reaction::{ReactionCounts, ReactionService};
pub use user::UserService;
