//! Test fixtures and data generators
//!
//! Request bodies and response shapes for the REST API.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Includes the process id so reruns against the same database do not collide.
pub fn unique_suffix() -> String {
    format!("{}x{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Signup request
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(req: &SignupRequest) -> Self {
        Self {
            email: req.email.clone(),
            password: req.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Post or comment body
#[derive(Debug, Serialize)]
pub struct ContentRequest {
    pub content: String,
}

impl ContentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Like (`true`) or dislike (`false`)
#[derive(Debug, Serialize)]
pub struct ReactionRequest {
    pub like: bool,
}

impl ReactionRequest {
    pub fn like() -> Self {
        Self { like: true }
    }

    pub fn dislike() -> Self {
        Self { like: false }
    }
}

/// Creator summary embedded in posts and comments
#[derive(Debug, Deserialize)]
pub struct CreatorResponse {
    pub id: String,
    pub username: String,
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub content: String,
    pub creator: Option<CreatorResponse>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub creator: Option<CreatorResponse>,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: String,
}

/// Counts returned by a reaction toggle
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounts {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }
}

/// List envelope
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
