//! Deadlines for operations that block on external I/O.

use std::future::Future;
use std::time::Duration;

use votebox_core::error::DomainError;

/// Default per-operation deadline for store and catalog calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs `operation` and aborts it with `DomainError::Timeout` once `limit`
/// elapses. The inner future is dropped on expiry.
///
/// # Errors
///
/// Returns the operation's own error, or `DomainError::Timeout` naming
/// `label` if the deadline passes first.
pub async fn within<T, F>(limit: Duration, label: &str, operation: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation = label, ?limit, "operation timed out");
            Err(DomainError::Timeout(format!(
                "{label} exceeded {}ms",
                limit.as_millis()
            )))
        }
    }
}
