//! Query handlers for the voting context.
//!
//! Reads are point-in-time snapshots of the vote store; an empty result
//! means "no votes yet" and is never an error.

use std::collections::BTreeMap;
use std::time::Duration;

use votebox_core::catalog::Catalog;
use votebox_core::error::DomainError;
use votebox_core::repository::VoteStore;
use votebox_core::vote::{AggregateResult, Vote};

use crate::application::deadline;
use crate::domain::aggregation;

/// Lists every vote cast by `session_id`.
///
/// # Errors
///
/// Propagates `StorageUnavailable`/`Timeout` from the store.
pub async fn list_votes_by_session(
    session_id: &str,
    store: &dyn VoteStore,
    timeout: Duration,
) -> Result<Vec<Vote>, DomainError> {
    deadline::within(timeout, "votes.find_by_session", store.find_by_session(session_id)).await
}

/// Lists every vote cast for `product_id`.
///
/// # Errors
///
/// Returns `DomainError::ProductNotFound` if the product is not in
/// `catalog`. Propagates `StorageUnavailable`/`Timeout` from the store.
pub async fn list_votes_by_product(
    product_id: &str,
    catalog: &Catalog,
    store: &dyn VoteStore,
    timeout: Duration,
) -> Result<Vec<Vote>, DomainError> {
    if !catalog.contains(product_id) {
        return Err(DomainError::ProductNotFound(product_id.to_owned()));
    }
    deadline::within(timeout, "votes.find_by_product", store.find_by_product(product_id)).await
}

/// Lists every stored vote.
///
/// # Errors
///
/// Propagates `StorageUnavailable`/`Timeout` from the store.
pub async fn list_all_votes(
    store: &dyn VoteStore,
    timeout: Duration,
) -> Result<Vec<Vote>, DomainError> {
    deadline::within(timeout, "votes.find_all", store.find_all()).await
}

/// Computes the aggregate for every product in `catalog`, plus any product
/// that still has votes after being delisted.
///
/// # Errors
///
/// Propagates `StorageUnavailable`/`Timeout` from the store.
pub async fn averages_for_all_products(
    catalog: &Catalog,
    store: &dyn VoteStore,
    timeout: Duration,
) -> Result<BTreeMap<String, AggregateResult>, DomainError> {
    let votes = list_all_votes(store, timeout).await?;
    Ok(aggregation::aggregate(&votes, catalog))
}
