//! Error handling utilities for the store layer

use channel_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert a SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Database(e.to_string())
}
