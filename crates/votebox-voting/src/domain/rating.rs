//! Rating bounds.

use std::ops::RangeInclusive;

use votebox_core::error::DomainError;

/// Lowest accepted rating.
pub const MIN_RATE: i64 = 1;

/// Highest accepted rating.
pub const MAX_RATE: i64 = 10;

/// The accepted rating range.
pub const RATE_RANGE: RangeInclusive<i64> = MIN_RATE..=MAX_RATE;

/// Checks `rate` against `1..=10` and narrows it to the stored width.
///
/// Zero, negative and too-large values all fail the same way.
///
/// # Errors
///
/// Returns `DomainError::InvalidRate` if `rate` is out of range.
pub fn validate_rate(rate: i64) -> Result<i32, DomainError> {
    if !RATE_RANGE.contains(&rate) {
        return Err(DomainError::InvalidRate(rate));
    }
    i32::try_from(rate).map_err(|_| DomainError::InvalidRate(rate))
}
