//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{ContentRequest, LoginRequest, ReactionRequest, SearchQuery, SignupRequest};

pub use responses::{
    ApiResponse, AuthResponse, CommentResponse, CreatorResponse, HealthChecks, HealthResponse,
    PostResponse, ReactionCountsResponse, ReadinessResponse, UserResponse,
};

pub use mappers::{index_users, CommentWithCreator, PostWithCreator};
