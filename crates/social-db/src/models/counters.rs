//! Counter projection shared by posts and comments

use sqlx::FromRow;

/// Counter columns of a post or comment row
///
/// Comment queries select `NULL::BIGINT AS comment_count`.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CountersModel {
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: Option<i64>,
}
