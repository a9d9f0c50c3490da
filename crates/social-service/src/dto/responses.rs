//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Identifiers serialize as plain UUID strings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use social_core::entities::UserRole;
use social_core::value_objects::{CommentId, PostId, UserId};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Token issued on signup and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(access_token: String, expires_in: i64, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Full account view (self and admin listing)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Public author info embedded in posts and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatorResponse {
    pub id: UserId,
    pub username: String,
}

// ============================================================================
// Post / Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub content: String,
    /// `None` when the author account could not be loaded
    pub creator: Option<CreatorResponse>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub content: String,
    pub creator: Option<CreatorResponse>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Totals returned after a like/dislike toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionCountsResponse {
    pub likes: i64,
    pub dislikes: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
