//! Vote records and the values derived from them.

use serde::{Deserialize, Serialize};

/// A single rating cast by one session for one product.
///
/// At most one `Vote` exists per `(session_id, product_id)` pair; a later
/// vote for the same pair overwrites `rate` in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Opaque session token of the voter.
    pub session_id: String,
    /// Catalog id of the rated product.
    pub product_id: String,
    /// Rating in `1..=10`.
    pub rate: i32,
}

impl Vote {
    /// Creates a new vote record.
    #[must_use]
    pub fn new(session_id: impl Into<String>, product_id: impl Into<String>, rate: i32) -> Self {
        Self {
            session_id: session_id.into(),
            product_id: product_id.into(),
            rate,
        }
    }
}

/// Outcome of an accepted vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOutcome {
    /// No vote existed for the pair; a new record was inserted.
    Created,
    /// A vote already existed for the pair; its rate was overwritten.
    Updated,
}

impl VoteOutcome {
    /// Maps the store's `existed_before` flag to an outcome.
    #[must_use]
    pub fn from_existed_before(existed_before: bool) -> Self {
        if existed_before {
            Self::Updated
        } else {
            Self::Created
        }
    }
}

/// Per-product summary computed on demand from the full vote set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Number of votes cast for the product.
    pub votes_count: u64,
    /// Arithmetic mean of all rates, or `0.0` when there are no votes.
    #[serde(rename = "avg")]
    pub average: f64,
}

impl AggregateResult {
    /// Result for a product nobody has voted on.
    pub const EMPTY: Self = Self {
        votes_count: 0,
        average: 0.0,
    };
}
