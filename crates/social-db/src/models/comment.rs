//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: Uuid,
    pub post_id: Uuid,
    pub creator_id: Uuid,
    pub content: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
