//! The voting service: the orchestrator the HTTP adapter talks to.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;
use votebox_core::catalog::{Catalog, CatalogHandle};
use votebox_core::error::DomainError;
use votebox_core::repository::VoteStore;
use votebox_core::vote::{AggregateResult, Vote};

use crate::application::command_handlers::{self, SubmitVoteResult};
use crate::application::deadline::DEFAULT_TIMEOUT;
use crate::application::query_handlers;
use crate::domain::commands::SubmitVote;

/// Validates and accepts votes and serves vote queries.
///
/// Each call reads the catalog snapshot once, so a concurrent refresh never
/// changes the catalog halfway through a call.
#[derive(Clone)]
pub struct VotingService {
    store: Arc<dyn VoteStore>,
    catalog: Arc<CatalogHandle>,
    timeout: Duration,
}

impl std::fmt::Debug for VotingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VotingService")
            .field("catalog_len", &self.catalog.snapshot().len())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl VotingService {
    /// Creates a service over `store` and the catalog owned by `catalog`.
    #[must_use]
    pub fn new(store: Arc<dyn VoteStore>, catalog: Arc<CatalogHandle>) -> Self {
        Self {
            store,
            catalog,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the deadline applied to every store operation.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The catalog handle this service validates against.
    #[must_use]
    pub fn catalog(&self) -> &Arc<CatalogHandle> {
        &self.catalog
    }

    /// Validates and stores a vote.
    ///
    /// # Errors
    ///
    /// See [`command_handlers::handle_submit_vote`].
    #[instrument(skip(self, command), fields(correlation_id = %command.correlation_id))]
    pub async fn submit_vote(&self, command: &SubmitVote) -> Result<SubmitVoteResult, DomainError> {
        let catalog = self.catalog.snapshot();
        command_handlers::handle_submit_vote(command, &catalog, self.store.as_ref(), self.timeout)
            .await
    }

    /// Lists the votes cast by one session.
    ///
    /// # Errors
    ///
    /// Propagates `StorageUnavailable`/`Timeout` from the store.
    #[instrument(skip(self))]
    pub async fn list_votes_by_session(&self, session_id: &str) -> Result<Vec<Vote>, DomainError> {
        query_handlers::list_votes_by_session(session_id, self.store.as_ref(), self.timeout).await
    }

    /// Lists the votes cast for one product.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ProductNotFound` for unknown products, and
    /// propagates `StorageUnavailable`/`Timeout` from the store.
    #[instrument(skip(self))]
    pub async fn list_votes_by_product(&self, product_id: &str) -> Result<Vec<Vote>, DomainError> {
        let catalog = self.catalog.snapshot();
        query_handlers::list_votes_by_product(product_id, &catalog, self.store.as_ref(), self.timeout)
            .await
    }

    /// Lists every stored vote.
    ///
    /// # Errors
    ///
    /// Propagates `StorageUnavailable`/`Timeout` from the store.
    #[instrument(skip(self))]
    pub async fn list_all_votes(&self) -> Result<Vec<Vote>, DomainError> {
        query_handlers::list_all_votes(self.store.as_ref(), self.timeout).await
    }

    /// Aggregates all votes per product, including zero-vote products.
    ///
    /// # Errors
    ///
    /// Propagates `StorageUnavailable`/`Timeout` from the store.
    #[instrument(skip(self))]
    pub async fn averages_for_all_products(
        &self,
    ) -> Result<BTreeMap<String, AggregateResult>, DomainError> {
        let catalog = self.catalog.snapshot();
        query_handlers::averages_for_all_products(&catalog, self.store.as_ref(), self.timeout).await
    }

    /// Returns the current catalog snapshot.
    #[must_use]
    pub fn list_products(&self) -> Arc<Catalog> {
        self.catalog.snapshot()
    }
}
