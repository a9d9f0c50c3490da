//! Middleware stack for the API server
//!
//! Every route gets a request id, an `http_request` span and a timeout.
//! The `/api/v1` tree additionally gets CORS and a global rate limit.

use axum::{
    body::Body,
    http::{header, header::HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use social_common::{AppError, CorsConfig, RateLimitConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level, Span};

use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upper bound on a single request, store lock waits included
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// `user_id` stays empty until the auth extractor records it
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
        user_id = tracing::field::Empty,
    )
}

/// Request id (outermost), trace span, then timeout (503)
fn observe<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            )),
    )
}

/// Base stack only; used for health probes
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    observe(router)
}

/// Base stack plus CORS inside and a global rate limit outside
///
/// # Errors
/// `AppError::Config` when governor rejects the rate limit settings
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Result<Router<AppState>, AppError> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rate_limit_config.requests_per_second.into())
        .burst_size(rate_limit_config.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish()
        .ok_or_else(|| {
            AppError::Config("rate limit period and burst must be non-zero".to_string())
        })?;

    let router = observe(router.layer(cors_layer(cors_config, is_production)));
    Ok(router.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id_header(),
        ])
        .expose_headers([request_id_header(), header::RETRY_AFTER]);

    if !config.allowed_origins.is_empty() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                let parsed = origin.parse::<HeaderValue>().ok();
                if parsed.is_none() {
                    warn!(%origin, "Ignoring invalid CORS origin");
                }
                parsed
            })
            .collect();
        info!(count = origins.len(), "CORS: allowing configured origins");
        return layer.allow_origin(AllowOrigin::list(origins));
    }

    if is_production {
        warn!("CORS: no origins configured in production, browser requests will be refused");
        layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
    } else {
        warn!("CORS: allowing any origin outside production");
        layer.allow_origin(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_request_id_is_generated_and_echoed() {
        let app: Router = observe(Router::new().route("/ping", get(|| async { "pong" })));

        let response = app
            .clone()
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let response = app
            .oneshot(
                Request::get("/ping")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }
}
