//! Comment entity - a reply attached to a post

use chrono::{DateTime, Utc};

use crate::value_objects::{CommentId, Counters, PostId, UserId};

use super::reaction::{Reactable, TargetRef};

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub creator_id: UserId,
    pub content: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment with zeroed counters
    pub fn new(post_id: PostId, creator_id: UserId, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            post_id,
            creator_id,
            content,
            like_count: 0,
            dislike_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_creator(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }
}

impl Reactable for Comment {
    fn target(&self) -> TargetRef {
        TargetRef::comment(self.id)
    }

    fn counters(&self) -> Counters {
        Counters {
            like_count: self.like_count,
            dislike_count: self.dislike_count,
            comment_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TargetKind;

    #[test]
    fn test_comment_creation() {
        let author = UserId::new();
        let comment = Comment::new(PostId::new(), author, "nice".to_string());
        assert!(comment.is_creator(author));
        assert!(!comment.is_creator(UserId::new()));
        assert_eq!(comment.counters(), Counters::for_comment());
        assert_eq!(comment.target().kind, TargetKind::Comment);
    }
}
