//! Path parameter extractors
//!
//! Typed extraction of UUID identifiers from path parameters.

use social_core::{CommentId, PostId};

use crate::response::ApiError;

/// Path parameters with post_id
#[derive(Debug, serde::Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    /// Parse post_id as a PostId
    pub fn post_id(&self) -> Result<PostId, ApiError> {
        self.post_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid post_id format"))
    }
}

/// Path parameters with comment_id
#[derive(Debug, serde::Deserialize)]
pub struct CommentIdPath {
    pub comment_id: String,
}

impl CommentIdPath {
    /// Parse comment_id as a CommentId
    pub fn comment_id(&self) -> Result<CommentId, ApiError> {
        self.comment_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))
    }
}
