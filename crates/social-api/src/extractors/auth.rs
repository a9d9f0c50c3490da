//! Bearer token extractor

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use social_common::JwtService;
use social_core::{UserId, UserRole};
use tracing::{warn, Span};

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identity taken from a valid access token
///
/// The role is a snapshot from token issue time. Admin-only operations
/// re-read the account instead of trusting it.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl AuthUser {
    /// Verify `token` and read the caller out of its claims
    pub fn from_token(jwt: &JwtService, token: &str) -> Result<Self, ApiError> {
        let claims = jwt.decode_token(token).inspect_err(|e| {
            warn!(error = %e, "Rejected access token");
        })?;
        let user_id = claims.user_id().inspect_err(|e| {
            warn!(error = %e, sub = %claims.sub, "Access token has no usable subject");
        })?;

        Ok(Self {
            user_id,
            role: claims.role,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let auth = Self::from_token(app_state.jwt_service(), bearer.token())?;

        Span::current().record("user_id", tracing::field::display(auth.user_id));
        Ok(auth)
    }
}
