//! Post entity - a short text published by a user

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{Counters, PostId, UserId};

use super::reaction::{Reactable, TargetRef};

/// Maximum characters in post and comment bodies
pub const MAX_CONTENT_CHARS: usize = 280;

/// Check a post or comment body against the length rules
///
/// # Errors
/// `ValidationError` for blank content, `ContentTooLong` past the limit.
pub fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "content must not be empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(DomainError::ContentTooLong {
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(())
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub creator_id: UserId,
    pub content: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post with zeroed counters
    pub fn new(creator_id: UserId, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            creator_id,
            content,
            like_count: 0,
            dislike_count: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_creator(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }

    /// Replace the content; counters are left alone
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Copy counter values read from the store
    pub fn set_counters(&mut self, counters: Counters) {
        self.like_count = counters.like_count;
        self.dislike_count = counters.dislike_count;
        if let Some(comment_count) = counters.comment_count {
            self.comment_count = comment_count;
        }
    }
}

impl Reactable for Post {
    fn target(&self) -> TargetRef {
        TargetRef::post(self.id)
    }

    fn counters(&self) -> Counters {
        Counters {
            like_count: self.like_count,
            dislike_count: self.dislike_count,
            comment_count: Some(self.comment_count),
        }
    }
}
