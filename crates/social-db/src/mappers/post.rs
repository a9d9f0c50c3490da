//! Post entity <-> model mapper

use social_core::entities::Post;
use social_core::value_objects::{PostId, UserId};

use crate::models::PostModel;

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::from_uuid(model.id),
            creator_id: UserId::from_uuid(model.creator_id),
            content: model.content,
            like_count: model.like_count,
            dislike_count: model.dislike_count,
            comment_count: model.comment_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
