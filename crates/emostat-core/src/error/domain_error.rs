//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// A stored emoji UID could not be turned back into an emoji.
    ///
    /// Recoverable: callers log the offending key and skip the row.
    #[error("failed to decode emoji uid: {uid}")]
    Decode { uid: String },

    /// A unicode short-name with no entry in the short-name table.
    #[error("unknown emoji short-name: {0}")]
    UnknownEmoji(String),

    /// The underlying persistence is unreachable.
    ///
    /// Surfaced to the caller of the mutating or query operation; the
    /// caller decides retry policy. Never swallowed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Database reported an error other than unavailability
    #[error("database error: {0}")]
    Database(String),

    /// Cache reported an error
    #[error("cache error: {0}")]
    Cache(String),
}

impl DomainError {
    /// Build a decode failure for the given UID
    pub fn decode(uid: impl Into<String>) -> Self {
        Self::Decode { uid: uid.into() }
    }

    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "DECODE_ERROR",
            Self::UnknownEmoji(_) => "UNKNOWN_EMOJI",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
        }
    }

    /// Check if this is a recoverable per-row decode failure
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::UnknownEmoji(_))
    }

    /// Check if the operation should be retried by the caller
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}
