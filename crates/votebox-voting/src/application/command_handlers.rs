//! Command handlers for the voting context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: validate against the catalog snapshot, then
//! persist through the vote store.

use std::time::Duration;

use tracing::{debug, info};
use votebox_core::catalog::Catalog;
use votebox_core::command::Command;
use votebox_core::error::DomainError;
use votebox_core::repository::VoteStore;
use votebox_core::vote::{Vote, VoteOutcome};

use crate::application::deadline;
use crate::domain::commands::SubmitVote;
use crate::domain::rating;

/// Result of a successfully handled `SubmitVote` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitVoteResult {
    /// Whether the vote was newly created or replaced an earlier one.
    pub outcome: VoteOutcome,
    /// The vote as stored.
    pub vote: Vote,
}

/// Handles the `SubmitVote` command.
///
/// Checks run in order and the first failure wins: the product must exist
/// in `catalog`, then the rate must be within `1..=10`. Only then is the
/// vote upserted.
///
/// # Errors
///
/// Returns `DomainError::ProductNotFound` or `DomainError::InvalidRate` for
/// rejected input, and propagates `StorageUnavailable`/`Timeout` from the
/// store unchanged.
pub async fn handle_submit_vote(
    command: &SubmitVote,
    catalog: &Catalog,
    store: &dyn VoteStore,
    timeout: Duration,
) -> Result<SubmitVoteResult, DomainError> {
    if !catalog.contains(&command.product_id) {
        debug!(product_id = %command.product_id, "rejecting vote for unknown product");
        return Err(DomainError::ProductNotFound(command.product_id.clone()));
    }
    let rate = rating::validate_rate(command.rate)?;

    let vote = Vote::new(command.session_id.clone(), command.product_id.clone(), rate);
    let existed_before =
        deadline::within(timeout, "votes.upsert", store.upsert_vote(&vote)).await?;
    let outcome = VoteOutcome::from_existed_before(existed_before);

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        product_id = %vote.product_id,
        ?outcome,
        "vote accepted"
    );

    Ok(SubmitVoteResult { outcome, vote })
}
