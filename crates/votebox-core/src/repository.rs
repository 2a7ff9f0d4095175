//! Storage capabilities consumed by the voting context.

use async_trait::async_trait;

use crate::catalog::Product;
use crate::error::DomainError;
use crate::vote::Vote;

/// Durable keyed storage of one vote per `(session_id, product_id)` pair.
///
/// Implementations do not re-validate business rules; callers hand over
/// votes whose rate has already been checked.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Inserts the vote, or overwrites the rate of the existing vote with the
    /// same key, as one atomic operation.
    ///
    /// Returns `true` if a vote for the key existed before and was replaced,
    /// `false` if it was newly created. Concurrent upserts for one key
    /// serialize: only one of them may return `false`, and the last to commit
    /// determines the stored rate.
    async fn upsert_vote(&self, vote: &Vote) -> Result<bool, DomainError>;

    /// Returns all votes cast by a session.
    async fn find_by_session(&self, session_id: &str) -> Result<Vec<Vote>, DomainError>;

    /// Returns all votes cast for a product.
    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Vote>, DomainError>;

    /// Returns every stored vote.
    async fn find_all(&self) -> Result<Vec<Vote>, DomainError>;
}

/// Upstream source the product catalog is refreshed from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the full product list.
    async fn fetch_all(&self) -> Result<Vec<Product>, DomainError>;
}
