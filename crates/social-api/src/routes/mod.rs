//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{comments, health, posts, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/signup", post(users::signup))
        .route("/users/login", post(users::login))
        .route("/users/@me", get(users::get_current_user))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post).get(posts::list_posts))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:post_id/like", put(posts::react_to_post))
        .route(
            "/posts/:post_id/comments",
            post(comments::create_comment).get(comments::list_comments),
        )
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/:comment_id", delete(comments::delete_comment))
        .route("/comments/:comment_id/like", put(comments::react_to_comment))
}
