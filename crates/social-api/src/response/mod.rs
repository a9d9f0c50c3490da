//! Error and status wrappers for handlers
//!
//! Every failure leaves the API as `{"error": {"code", "message", "details"?}}`.

use std::fmt;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use social_common::AppError;
use social_core::DomainError;
use social_service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

/// Seconds a client should wait before replaying a conflicted or timed-out toggle
const RETRY_AFTER_SECS: &str = "1";

/// Which part of the request could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadInput {
    Path,
    Query,
    Body,
}

impl BadInput {
    fn code(self) -> &'static str {
        match self {
            Self::Path => "INVALID_PATH_PARAMETER",
            Self::Query => "INVALID_QUERY_PARAMETER",
            Self::Body => "INVALID_BODY",
        }
    }
}

impl fmt::Display for BadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Path => "Invalid path parameter",
            Self::Query => "Invalid query parameter",
            Self::Body => "Invalid request body",
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{input}: {message}")]
    BadRequest { input: BadInput, message: String },

    #[error("Missing authorization header")]
    MissingAuth,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Service(err.into())
    }
}

impl ApiError {
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::bad_request(BadInput::Path, msg)
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::bad_request(BadInput::Query, msg)
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::bad_request(BadInput::Body, msg)
    }

    fn bad_request(input: BadInput, msg: impl Into<String>) -> Self {
        Self::BadRequest {
            input,
            message: msg.into(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Validation(_) | Self::BadRequest { .. } => 400,
            Self::MissingAuth => 401,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest { input, .. } => input.code(),
            Self::MissingAuth => "MISSING_AUTHORIZATION",
        }
    }

    /// Lost write races and lock timeouts; replaying the request is safe
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Service(e) if e.is_retryable())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        if status.is_server_error() {
            error!(error = ?self, code = %code, "Server error occurred");
        } else if self.is_retryable() {
            warn!(code = %code, "Reaction toggle gave up after retries");
        }

        let details = match &self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };
        let retry = self.is_retryable();

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message: self.to_string(),
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if retry {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from_static(RETRY_AFTER_SECS),
            );
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// 201 with the wrapped body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, self.0).into_response()
    }
}

/// 204
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use social_core::PostId;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingAuth.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::invalid_path("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(DomainError::PostNotFound(PostId::new())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DomainError::StoreBusy("lock".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(AppError::TokenExpired).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_bad_input_codes() {
        assert_eq!(ApiError::invalid_path("x").error_code(), "INVALID_PATH_PARAMETER");
        assert_eq!(ApiError::invalid_query("x").error_code(), "INVALID_QUERY_PARAMETER");
        assert_eq!(ApiError::invalid_body("x").error_code(), "INVALID_BODY");
        assert_eq!(
            ApiError::invalid_body("missing field").to_string(),
            "Invalid request body: missing field"
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::from(DomainError::NotAuthor).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());

        let body = body_of(response).await;
        assert_eq!(body["error"]["code"], "NOT_AUTHOR");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_conflict_carries_retry_after() {
        let response = ApiError::from(DomainError::ReactionConflict).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response.headers()[header::RETRY_AFTER], RETRY_AFTER_SECS);

        let body = body_of(response).await;
        assert_eq!(body["error"]["code"], "REACTION_CONFLICT");
    }
}
