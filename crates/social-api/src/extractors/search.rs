//! Search extractor
//!
//! Extracts the optional `?q=` filter used by list endpoints.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use social_service::dto::SearchQuery;

use crate::response::ApiError;

/// Trimmed, non-empty `q` parameter
#[derive(Debug, Clone, Default)]
pub struct Search(pub Option<String>);

impl Search {
    pub fn term(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Search
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<SearchQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(Self(query.term().map(String::from)))
    }
}
