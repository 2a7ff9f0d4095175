//! Keeps the catalog snapshot in step with its upstream source.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use votebox_core::catalog::{Catalog, CatalogHandle};
use votebox_core::error::DomainError;
use votebox_core::repository::ProductSource;

use crate::application::deadline;

/// Fetches the product list once and swaps it in as the new snapshot.
///
/// Returns the number of products in the new snapshot. On failure the
/// current snapshot is left untouched.
///
/// # Errors
///
/// Propagates the source's error, or `DomainError::Timeout` if the fetch
/// exceeds `timeout`.
pub async fn refresh_catalog(
    source: &dyn ProductSource,
    handle: &CatalogHandle,
    timeout: Duration,
) -> Result<usize, DomainError> {
    let products = deadline::within(timeout, "products.fetch_all", source.fetch_all()).await?;
    let catalog = Catalog::new(products);
    let count = catalog.len();
    handle.replace(catalog);
    Ok(count)
}

/// Spawns a task that refreshes the catalog every `period`.
///
/// The first refresh happens one `period` after spawning; callers load the
/// initial snapshot themselves. Failed refreshes are logged and retried on
/// the next tick.
pub fn spawn_catalog_refresh(
    source: Arc<dyn ProductSource>,
    handle: Arc<CatalogHandle>,
    period: Duration,
    timeout: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match refresh_catalog(source.as_ref(), &handle, timeout).await {
                Ok(count) => info!(products = count, "catalog refreshed"),
                Err(error) => warn!(%error, "catalog refresh failed; keeping previous snapshot"),
            }
        }
    })
}
