//! Axum extractors for request handling
//!
//! Custom extractors for pagination and validated JSON bodies.

mod pagination;
mod validated;

pub use pagination::{Pagination, PaginationParams};
pub use validated::ValidatedJson;
