//! Votebox API — HTTP adapter over the voting service.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::session::SessionSettings;
use crate::state::AppState;

/// Builds the full application router with its middleware stack.
pub fn build_router(app_state: AppState, sessions: &SessionSettings) -> Router {
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let api = Router::new()
        .merge(routes::health::router())
        .nest("/products", routes::products::router())
        .nest("/votes", routes::votes::router());

    sessions
        .apply(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
