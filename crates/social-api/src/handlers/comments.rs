//! Comment handlers
//!
//! Comment create/list/delete and the comment like/dislike toggle.

use axum::{
    extract::{Path, State},
    Json,
};
use social_core::Vote;
use social_service::dto::{
    ApiResponse, CommentResponse, ContentRequest, ReactionCountsResponse, ReactionRequest,
};
use social_service::{CommentService, ReactionService};

use crate::extractors::{AuthUser, CommentIdPath, JsonBody, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<ContentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .create(auth.user_id, path.post_id()?, request.content)
        .await?;
    Ok(Created(Json(comment)))
}

/// Comments of a post, oldest first
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<ApiResponse<Vec<CommentResponse>>>> {
    let service = CommentService::new(state.service_context());
    let comments = service.list(path.post_id()?).await?;
    Ok(Json(ApiResponse::new(comments)))
}

/// Delete a comment
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete(auth.user_id, path.comment_id()?).await?;
    Ok(NoContent)
}

/// Toggle like/dislike on a comment
///
/// PUT /comments/{comment_id}/like
pub async fn react_to_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
    JsonBody(request): JsonBody<ReactionRequest>,
) -> ApiResult<Json<ReactionCountsResponse>> {
    let service = ReactionService::new(state.service_context());
    let counts = service
        .react_to_comment(
            auth.user_id,
            path.comment_id()?,
            Vote::from_like_flag(request.like),
        )
        .await?;
    Ok(Json(counts.into()))
}
