//! Post handlers
//!
//! Post CRUD and the post like/dislike toggle.

use axum::{
    extract::{Path, State},
    Json,
};
use social_core::Vote;
use social_service::dto::{
    ApiResponse, ContentRequest, PostResponse, ReactionCountsResponse, ReactionRequest,
};
use social_service::{PostService, ReactionService};

use crate::extractors::{AuthUser, JsonBody, PostIdPath, Search, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Publish a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ContentRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create(auth.user_id, request.content).await?;
    Ok(Created(Json(post)))
}

/// List posts, newest first
///
/// GET /posts?q=
pub async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    search: Search,
) -> ApiResult<Json<ApiResponse<Vec<PostResponse>>>> {
    let service = PostService::new(state.service_context());
    let posts = service.list(search.term()).await?;
    Ok(Json(ApiResponse::new(posts)))
}

/// Get a single post
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get(path.post_id()?).await?;
    Ok(Json(post))
}

/// Edit the content of a post
///
/// PUT /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<ContentRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service
        .edit(auth.user_id, path.post_id()?, request.content)
        .await?;
    Ok(Json(post))
}

/// Delete a post
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete(auth.user_id, path.post_id()?).await?;
    Ok(NoContent)
}

/// Toggle like/dislike on a post
///
/// PUT /posts/{post_id}/like
pub async fn react_to_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    JsonBody(request): JsonBody<ReactionRequest>,
) -> ApiResult<Json<ReactionCountsResponse>> {
    let service = ReactionService::new(state.service_context());
    let counts = service
        .react_to_post(auth.user_id, path.post_id()?, Vote::from_like_flag(request.like))
        .await?;
    Ok(Json(counts.into()))
}
