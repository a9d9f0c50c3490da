//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::TargetRef;
use crate::value_objects::{CommentId, PostId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing acting user identity")]
    Unauthorized,

    #[error("Not the creator of this resource")]
    NotAuthor,

    #[error("Administrator role required")]
    AdminOnly,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Concurrent reaction on the same target, retry")]
    ReactionConflict,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Counter would become negative")]
    CounterUnderflow,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store busy: {0}")]
    StoreBusy(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Not-found error for a reaction target
    pub fn target_not_found(target: TargetRef) -> Self {
        match target.as_post() {
            Some(post_id) => Self::PostNotFound(post_id),
            None => Self::CommentNotFound(CommentId::from_uuid(target.id)),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotAuthor => "NOT_AUTHOR",
            Self::AdminOnly => "ADMIN_ONLY",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::ReactionConflict => "REACTION_CONFLICT",

            // Business Rules
            Self::CounterUnderflow => "COUNTER_UNDERFLOW",

            // Infrastructure
            Self::StoreBusy(_) => "STORE_BUSY",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::PostNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::ContentTooLong { .. })
    }

    /// Check if the caller could not be identified
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAuthor | Self::AdminOnly)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::ReactionConflict)
    }

    /// Check if running the whole unit of work again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ReactionConflict | Self::StoreBusy(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::PostNotFound(PostId::new());
        assert_eq!(err.code(), "UNKNOWN_POST");

        assert_eq!(DomainError::ReactionConflict.code(), "REACTION_CONFLICT");
        assert_eq!(DomainError::StoreBusy("lock".into()).code(), "STORE_BUSY");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(UserId::new()).is_not_found());
        assert!(DomainError::CommentNotFound(CommentId::new()).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_target_not_found() {
        let post_id = PostId::new();
        let err = DomainError::target_not_found(TargetRef::post(post_id));
        assert!(matches!(err, DomainError::PostNotFound(id) if id == post_id));

        let comment_id = CommentId::new();
        let err = DomainError::target_not_found(TargetRef::comment(comment_id));
        assert!(matches!(err, DomainError::CommentNotFound(id) if id == comment_id));
    }

    #[test]
    fn test_retryable() {
        assert!(DomainError::ReactionConflict.is_retryable());
        assert!(DomainError::StoreBusy("timeout".into()).is_retryable());
        assert!(!DomainError::CounterUnderflow.is_retryable());
        assert!(!DomainError::Unauthorized.is_authorization());
        assert!(DomainError::Unauthorized.is_unauthenticated());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ContentTooLong { max: 280 };
        assert_eq!(err.to_string(), "Content too long: max 280 characters");
    }
}
