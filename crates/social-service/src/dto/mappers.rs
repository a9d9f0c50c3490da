//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use std::collections::HashMap;

use social_core::entities::{Comment, Post, User};
use social_core::value_objects::UserId;

use super::responses::{
    CommentResponse, CreatorResponse, PostResponse, ReactionCountsResponse, UserResponse,
};
use crate::services::ReactionCounts;

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CreatorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

// ============================================================================
// Post / Comment Mappers
// ============================================================================

/// Post with its author loaded
#[derive(Debug, Clone)]
pub struct PostWithCreator {
    pub post: Post,
    pub creator: Option<User>,
}

impl From<PostWithCreator> for PostResponse {
    fn from(data: PostWithCreator) -> Self {
        let PostWithCreator { post, creator } = data;
        Self {
            id: post.id,
            content: post.content,
            creator: creator.as_ref().map(CreatorResponse::from),
            like_count: post.like_count,
            dislike_count: post.dislike_count,
            comment_count: post.comment_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Comment with its author loaded
#[derive(Debug, Clone)]
pub struct CommentWithCreator {
    pub comment: Comment,
    pub creator: Option<User>,
}

impl From<CommentWithCreator> for CommentResponse {
    fn from(data: CommentWithCreator) -> Self {
        let CommentWithCreator { comment, creator } = data;
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            creator: creator.as_ref().map(CreatorResponse::from),
            like_count: comment.like_count,
            dislike_count: comment.dislike_count,
            created_at: comment.created_at,
        }
    }
}

/// Index users by id for attaching creators to listings
pub fn index_users(users: Vec<User>) -> HashMap<UserId, User> {
    users.into_iter().map(|user| (user.id, user)).collect()
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<ReactionCounts> for ReactionCountsResponse {
    fn from(counts: ReactionCounts) -> Self {
        Self {
            likes: counts.like_count,
            dislikes: counts.dislike_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::entities::UserRole;

    #[test]
    fn test_post_response_carries_counters_and_creator() {
        let user = User::new("ana".to_string(), "ana@example.com".to_string(), UserRole::Normal);
        let mut post = Post::new(user.id, "hi".to_string());
        post.like_count = 3;
        post.comment_count = 2;

        let response = PostResponse::from(PostWithCreator {
            post,
            creator: Some(user.clone()),
        });

        assert_eq!(response.like_count, 3);
        assert_eq!(response.comment_count, 2);
        assert_eq!(
            response.creator,
            Some(CreatorResponse {
                id: user.id,
                username: "ana".to_string()
            })
        );
    }

    #[test]
    fn test_reaction_counts_mapping() {
        let response = ReactionCountsResponse::from(ReactionCounts {
            like_count: 4,
            dislike_count: 1,
        });
        assert_eq!(response, ReactionCountsResponse { likes: 4, dislikes: 1 });
    }
}
