//! Votebox Store — infrastructure implementations of the core storage
//! capabilities.

pub mod json_product_source;
pub mod pg_product_source;
pub mod pg_vote_store;

use votebox_core::error::DomainError;

/// Maps a database error onto the domain taxonomy. Pool acquisition
/// timeouts become `Timeout`; everything else is `StorageUnavailable`.
pub(crate) fn storage_error(error: sqlx::Error) -> DomainError {
    match error {
        sqlx::Error::PoolTimedOut => DomainError::Timeout("database connection acquire".into()),
        other => {
            tracing::error!(error = %other, "database operation failed");
            DomainError::StorageUnavailable(other.to_string())
        }
    }
}
