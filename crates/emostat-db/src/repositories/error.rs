//! Error handling utilities for repositories

use emostat_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert a SQLx error to a DomainError.
///
/// Connectivity failures become `StoreUnavailable` so callers can tell
/// "try again" apart from a genuine query problem.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match &e {
        SqlxError::Io(_)
        | SqlxError::Tls(_)
        | SqlxError::PoolTimedOut
        | SqlxError::PoolClosed => DomainError::StoreUnavailable(e.to_string()),
        _ => DomainError::Database(e.to_string()),
    }
}
