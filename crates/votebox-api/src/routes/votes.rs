//! Routes for casting and listing votes.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use votebox_core::vote::{Vote, VoteOutcome};
use votebox_voting::domain::commands;

use crate::error::{ApiError, AppJson};
use crate::session::SessionToken;
use crate::state::AppState;

/// Request body for POST /votes.
#[derive(Debug, Deserialize)]
pub struct SubmitVoteRequest {
    /// The product being rated.
    pub product_id: String,
    /// Rating in `1..=10`.
    pub rate: i64,
}

/// Response body returned after a vote is accepted.
#[derive(Debug, Serialize)]
pub struct SubmitVoteResponse {
    /// Whether the vote was new or replaced an earlier one.
    pub outcome: VoteOutcome,
    /// Human-readable confirmation.
    pub message: &'static str,
    /// The vote as stored, including the caller's session id.
    pub vote: Vote,
}

/// POST /votes
#[instrument(skip(state, session, request), fields(product_id = %request.product_id))]
async fn submit_vote(
    State(state): State<AppState>,
    session: SessionToken,
    AppJson(request): AppJson<SubmitVoteRequest>,
) -> Result<Json<SubmitVoteResponse>, ApiError> {
    let command = commands::SubmitVote {
        correlation_id: Uuid::new_v4(),
        session_id: session.0,
        product_id: request.product_id,
        rate: request.rate,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_vote command");

    let result = state.voting.submit_vote(&command).await?;
    let message = match result.outcome {
        VoteOutcome::Created => "Your vote has been received successfully!",
        VoteOutcome::Updated => "Vote already exists, your rate of the product was updated",
    };

    Ok(Json(SubmitVoteResponse {
        outcome: result.outcome,
        message,
        vote: result.vote,
    }))
}

/// GET /votes
#[instrument(skip(state))]
async fn list_all_votes(State(state): State<AppState>) -> Result<Json<Vec<Vote>>, ApiError> {
    Ok(Json(state.voting.list_all_votes().await?))
}

/// GET /votes/session/{id}
#[instrument(skip(state))]
async fn list_votes_by_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    Ok(Json(state.voting.list_votes_by_session(&session_id).await?))
}

/// GET /votes/product/{id}
#[instrument(skip(state))]
async fn list_votes_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Vec<Vote>>, ApiError> {
    Ok(Json(state.voting.list_votes_by_product(&product_id).await?))
}

/// Returns the router for vote commands and queries.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_votes).post(submit_vote))
        .route("/session/{id}", get(list_votes_by_session))
        .route("/product/{id}", get(list_votes_by_product))
}
