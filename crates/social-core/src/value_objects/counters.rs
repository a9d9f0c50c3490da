//! Denormalized target counters and the signed deltas applied to them

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Current counter values of a target
///
/// `comment_count` is only present for posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: Option<i64>,
}

impl Counters {
    /// Zeroed counters for a new post
    pub const fn for_post() -> Self {
        Self {
            like_count: 0,
            dislike_count: 0,
            comment_count: Some(0),
        }
    }

    /// Zeroed counters for a new comment
    pub const fn for_comment() -> Self {
        Self {
            like_count: 0,
            dislike_count: 0,
            comment_count: None,
        }
    }

    /// Apply a delta with the non-negative floor enforced
    ///
    /// # Errors
    /// `CounterUnderflow` if any counter would drop below zero, and
    /// `InternalError` for a comment delta on a target without a comment counter.
    pub fn apply(&self, delta: CounterDelta) -> Result<Self, DomainError> {
        let like_count = floor_checked(self.like_count, delta.like)?;
        let dislike_count = floor_checked(self.dislike_count, delta.dislike)?;

        let comment_count = match (self.comment_count, delta.comment) {
            (Some(current), d) => Some(floor_checked(current, d)?),
            (None, 0) => None,
            (None, _) => {
                return Err(DomainError::InternalError(
                    "comment delta applied to a target without a comment counter".to_string(),
                ))
            }
        };

        Ok(Self {
            like_count,
            dislike_count,
            comment_count,
        })
    }
}

fn floor_checked(current: i64, delta: i64) -> Result<i64, DomainError> {
    match current.checked_add(delta) {
        Some(next) if next >= 0 => Ok(next),
        _ => Err(DomainError::CounterUnderflow),
    }
}

/// Signed change applied to a target's counters in one atomic step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub like: i64,
    pub dislike: i64,
    pub comment: i64,
}

impl CounterDelta {
    pub const ZERO: Self = Self {
        like: 0,
        dislike: 0,
        comment: 0,
    };

    /// Delta touching only the vote counters
    #[inline]
    pub const fn votes(like: i64, dislike: i64) -> Self {
        Self {
            like,
            dislike,
            comment: 0,
        }
    }

    /// Delta touching only the comment counter
    #[inline]
    pub const fn comments(comment: i64) -> Self {
        Self {
            like: 0,
            dislike: 0,
            comment,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
