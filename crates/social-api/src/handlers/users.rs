//! User handlers
//!
//! Signup, login, the current account and the admin user listing.

use axum::{extract::State, Json};
use social_service::dto::{ApiResponse, AuthResponse, LoginRequest, SignupRequest, UserResponse};
use social_service::{AuthService, UserService};

use crate::extractors::{AuthUser, Search, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /users/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.signup(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.current(auth.user_id).await?;
    Ok(Json(user))
}

/// List users (admin only)
///
/// GET /users?q=
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    search: Search,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let service = UserService::new(state.service_context());
    let users = service.list(auth.user_id, search.term()).await?;
    Ok(Json(ApiResponse::new(users)))
}
