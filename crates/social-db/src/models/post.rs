//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub content: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
