//! Routes for products and their aggregated ratings.

use std::collections::{BTreeMap, HashMap};

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::instrument;
use votebox_core::catalog::Product;
use votebox_core::vote::AggregateResult;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /products
#[instrument(skip(state))]
async fn list_products(State(state): State<AppState>) -> Json<HashMap<String, Product>> {
    let catalog = state.voting.list_products();
    Json(catalog.products().clone())
}

/// GET /products/avgs
#[instrument(skip(state))]
async fn list_averages(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, AggregateResult>>, ApiError> {
    let averages = state.voting.averages_for_all_products().await?;
    Ok(Json(averages))
}

/// Returns the router for product queries.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/avgs", get(list_averages))
}
