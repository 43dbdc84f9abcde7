//! Pagination extractor
//!
//! Extracts page-number pagination parameters from query strings. Both
//! parameters are required: a missing or out-of-range value rejects the
//! request before any handler code runs.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Maximum page size
const MAX_PAGE_SIZE: u32 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// One-based page number
    pub page: u32,
    /// Number of items per page
    pub page_size: u32,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// One-based page number (>= 1)
    pub page: u32,
    /// Number of items per page (1-100)
    pub page_size: u32,
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        if params.page == 0 {
            return Err(ApiError::invalid_query("page must be >= 1"));
        }
        if params.page_size == 0 || params.page_size > MAX_PAGE_SIZE {
            return Err(ApiError::invalid_query(format!(
                "page_size must be 1-{MAX_PAGE_SIZE}"
            )));
        }

        Ok(Pagination {
            page: params.page,
            page_size: params.page_size,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}
