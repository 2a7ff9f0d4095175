//! Test vote stores — `VoteStore` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use votebox_core::error::DomainError;
use votebox_core::repository::VoteStore;
use votebox_core::vote::Vote;

/// An in-memory vote store keyed by `(session_id, product_id)`.
///
/// The check-and-write in `upsert_vote` happens under one lock, which gives
/// the same per-key serialization the database's unique-key upsert does.
/// Reads come back ordered by session id, then product id.
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    votes: Mutex<BTreeMap<(String, String), i32>>,
}

impl InMemoryVoteStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `votes`. Later duplicates of a key
    /// overwrite earlier ones.
    #[must_use]
    pub fn with_votes(votes: impl IntoIterator<Item = Vote>) -> Self {
        let votes = votes
            .into_iter()
            .map(|vote| ((vote.session_id, vote.product_id), vote.rate))
            .collect();
        Self {
            votes: Mutex::new(votes),
        }
    }

    /// Number of stored votes.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.votes.lock().unwrap().len()
    }

    /// Returns `true` if no votes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select(&self, keep: impl Fn(&str, &str) -> bool) -> Vec<Vote> {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|((session_id, product_id), _)| keep(session_id.as_str(), product_id.as_str()))
            .map(|((session_id, product_id), rate)| {
                Vote::new(session_id.clone(), product_id.clone(), *rate)
            })
            .collect()
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn upsert_vote(&self, vote: &Vote) -> Result<bool, DomainError> {
        let previous = self
            .votes
            .lock()
            .unwrap()
            .insert((vote.session_id.clone(), vote.product_id.clone()), vote.rate);
        Ok(previous.is_some())
    }

    async fn find_by_session(&self, session_id: &str) -> Result<Vec<Vote>, DomainError> {
        Ok(self.select(|session, _| session == session_id))
    }

    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Vote>, DomainError> {
        Ok(self.select(|_, product| product == product_id))
    }

    async fn find_all(&self) -> Result<Vec<Vote>, DomainError> {
        Ok(self.select(|_, _| true))
    }
}

/// A vote store whose every operation fails with `StorageUnavailable`.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingVoteStore;

#[async_trait]
impl VoteStore for FailingVoteStore {
    async fn upsert_vote(&self, _vote: &Vote) -> Result<bool, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_by_session(&self, _session_id: &str) -> Result<Vec<Vote>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_by_product(&self, _product_id: &str) -> Result<Vec<Vote>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_all(&self) -> Result<Vec<Vote>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }
}

/// An in-memory vote store that sleeps for `delay` before every operation.
/// Useful for testing deadlines.
#[derive(Debug)]
pub struct SlowVoteStore {
    delay: Duration,
    inner: InMemoryVoteStore,
}

impl SlowVoteStore {
    /// Create an empty store that delays every call by `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: InMemoryVoteStore::new(),
        }
    }
}

#[async_trait]
impl VoteStore for SlowVoteStore {
    async fn upsert_vote(&self, vote: &Vote) -> Result<bool, DomainError> {
        tokio::time::sleep(self.delay).await;
        self.inner.upsert_vote(vote).await
    }

    async fn find_by_session(&self, session_id: &str) -> Result<Vec<Vote>, DomainError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_by_session(session_id).await
    }

    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Vote>, DomainError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_by_product(product_id).await
    }

    async fn find_all(&self) -> Result<Vec<Vote>, DomainError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_reports_existed_before() {
        let store = InMemoryVoteStore::new();

        assert!(!store.upsert_vote(&Vote::new("s1", "p1", 2)).await.unwrap());
        assert!(store.upsert_vote(&Vote::new("s1", "p1", 6)).await.unwrap());

        assert_eq!(store.find_all().await.unwrap(), vec![Vote::new("s1", "p1", 6)]);
    }

    #[tokio::test]
    async fn test_filters_by_session_and_product() {
        let store = InMemoryVoteStore::with_votes([
            Vote::new("s1", "p1", 1),
            Vote::new("s1", "p2", 2),
            Vote::new("s2", "p1", 3),
        ]);

        assert_eq!(store.find_by_session("s1").await.unwrap().len(), 2);
        assert_eq!(store.find_by_product("p1").await.unwrap().len(), 2);
        assert!(store.find_by_product("p9").await.unwrap().is_empty());
    }
}
