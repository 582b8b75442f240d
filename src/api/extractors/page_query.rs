use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::pagination::PageRequest;

// Kept as text so that "abc" / "1.5" / "0" reach our own validation
#[derive(Debug, Default, Deserialize)]
struct RawPageQuery {
    page: Option<String>,
    limit: Option<String>,
}

/// `?page=&limit=` of the collection, validated into a PageRequest.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery(pub PageRequest);

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("Invalid query string"))?;

        let req = PageRequest::parse(raw.page.as_deref(), raw.limit.as_deref())?;
        Ok(Self(req))
    }
}
