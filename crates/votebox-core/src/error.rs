//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// `ProductNotFound` and `InvalidRate` are deterministic client-input errors.
/// `StorageUnavailable` and `Timeout` originate below the voting service and
/// are propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The referenced product id is not in the current catalog snapshot.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// The rate is outside the inclusive range `1..=10`.
    #[error("invalid rate {0}: rate must be between 1 and 10")]
    InvalidRate(i64),

    /// The backing store could not be reached or failed the operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The operation exceeded its deadline.
    #[error("operation timed out: {0}")]
    Timeout(String),
}

impl DomainError {
    /// Returns `true` for errors caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ProductNotFound(_) | Self::InvalidRate(_))
    }
}
