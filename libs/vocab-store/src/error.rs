//! Store error types.

use thiserror::Error;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures surfaced by the persistence layer. No retries happen anywhere;
/// every error propagates to the caller once.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("entry not found: {0}")]
    EntryNotFound(i64),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
