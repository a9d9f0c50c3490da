//! Comment entity <-> model mapper

use social_core::entities::Comment;
use social_core::value_objects::{CommentId, PostId, UserId};

use crate::models::CommentModel;

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::from_uuid(model.id),
            post_id: PostId::from_uuid(model.post_id),
            creator_id: UserId::from_uuid(model.creator_id),
            content: model.content,
            like_count: model.like_count,
            dislike_count: model.dislike_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
