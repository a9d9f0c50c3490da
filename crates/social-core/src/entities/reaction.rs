//! Reaction entity - one user's current like/dislike on a post or comment

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{CommentId, Counters, PostId, UserId};

/// A user's stance on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    /// Map the `like` flag used by the HTTP layer
    #[inline]
    pub fn from_like_flag(like: bool) -> Self {
        if like {
            Self::Like
        } else {
            Self::Dislike
        }
    }

    /// Storage representation (`1` like, `-1` dislike)
    #[inline]
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Like),
            -1 => Some(Self::Dislike),
            _ => None,
        }
    }
}

/// Kind of entity a reaction is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a reactable target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: Uuid,
}

impl TargetRef {
    #[inline]
    pub fn post(id: PostId) -> Self {
        Self {
            kind: TargetKind::Post,
            id: id.into_inner(),
        }
    }

    #[inline]
    pub fn comment(id: CommentId) -> Self {
        Self {
            kind: TargetKind::Comment,
            id: id.into_inner(),
        }
    }

    /// The post id, when this references a post
    pub fn as_post(&self) -> Option<PostId> {
        match self.kind {
            TargetKind::Post => Some(PostId::from_uuid(self.id)),
            TargetKind::Comment => None,
        }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub user_id: UserId,
    pub target: TargetRef,
    pub vote: Vote,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(user_id: UserId, target: TargetRef, vote: Vote) -> Self {
        Self {
            user_id,
            target,
            vote,
            created_at: Utc::now(),
        }
    }
}

/// Anything that carries like/dislike counters and can be reacted to
pub trait Reactable {
    fn target(&self) -> TargetRef;

    fn counters(&self) -> Counters;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_storage_mapping() {
        assert_eq!(Vote::from_i16(Vote::Like.as_i16()), Some(Vote::Like));
        assert_eq!(Vote::from_i16(Vote::Dislike.as_i16()), Some(Vote::Dislike));
        assert_eq!(Vote::from_i16(0), None);
    }

    #[test]
    fn test_like_flag() {
        assert_eq!(Vote::from_like_flag(true), Vote::Like);
        assert_eq!(Vote::from_like_flag(false), Vote::Dislike);
    }

    #[test]
    fn test_target_ref() {
        let post_id = PostId::new();
        let target = TargetRef::post(post_id);
        assert_eq!(target.as_post(), Some(post_id));
        assert_eq!(target.to_string(), format!("post:{post_id}"));

        let target = TargetRef::comment(CommentId::new());
        assert_eq!(target.as_post(), None);
    }
}
