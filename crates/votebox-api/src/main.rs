//! Votebox API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use votebox_api::config::Config;
use votebox_api::error::AppError;
use votebox_api::state::AppState;
use votebox_api::{build_router, telemetry};
use votebox_core::catalog::CatalogHandle;
use votebox_core::repository::ProductSource;
use votebox_store::json_product_source::JsonFileProductSource;
use votebox_store::pg_product_source::PgProductSource;
use votebox_store::pg_vote_store::PgVoteStore;
use votebox_voting::application::catalog_refresh;
use votebox_voting::application::service::VotingService;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let _telemetry = telemetry::init()?;

    tracing::info!("Starting Votebox API server");

    let config = Config::from_env()?;

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.store_timeout)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Seed and load the product catalog.
    let product_source = PgProductSource::new(pool.clone());
    if let Some(path) = &config.products_file {
        let products = JsonFileProductSource::new(path).fetch_all().await?;
        product_source.seed(&products).await?;
    }
    let catalog = Arc::new(CatalogHandle::default());
    let loaded =
        catalog_refresh::refresh_catalog(&product_source, &catalog, config.store_timeout).await?;
    tracing::info!(products = loaded, "catalog loaded");

    if let Some(period) = config.catalog_refresh {
        catalog_refresh::spawn_catalog_refresh(
            Arc::new(product_source),
            Arc::clone(&catalog),
            period,
            config.store_timeout,
        );
    }

    // Build application state.
    let voting = VotingService::new(Arc::new(PgVoteStore::new(pool)), catalog)
        .with_timeout(config.store_timeout);
    let app = build_router(AppState::new(voting), &config.sessions);

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
