//! # social-service
//!
//! Application layer containing the reaction engine, the comment cascade,
//! the CRUD services and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, PermissionService, PostService, ReactionCounts, ReactionService,
    ServiceContext, ServiceError, ServiceResult, UserService,
};
