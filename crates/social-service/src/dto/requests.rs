//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// User Requests
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Post / Comment Requests
// ============================================================================

/// Body of a post or a comment, used for create and edit
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContentRequest {
    #[validate(length(min = 1, max = 280, message = "Content must be 1-280 characters"))]
    pub content: String,
}

/// `?q=` filter on list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    /// Trimmed, non-empty filter
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Like (`true`) or dislike (`false`) toggle
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReactionRequest {
    pub like: bool,
}
