//! Test product sources — `ProductSource` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use votebox_core::catalog::Product;
use votebox_core::error::DomainError;
use votebox_core::repository::ProductSource;

/// A product source that returns a configurable product list. The list can
/// be swapped with [`StaticProductSource::set`] to simulate upstream changes.
#[derive(Debug, Default)]
pub struct StaticProductSource {
    products: Mutex<Vec<Product>>,
}

impl StaticProductSource {
    /// Create a source that returns `products` until changed.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }

    /// Replace the product list returned by later fetches.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn set(&self, products: Vec<Product>) {
        *self.products.lock().unwrap() = products;
    }
}

#[async_trait]
impl ProductSource for StaticProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.lock().unwrap().clone())
    }
}

/// A product source that always fails with `StorageUnavailable`.
#[derive(Debug)]
pub struct FailingProductSource;

#[async_trait]
impl ProductSource for FailingProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, DomainError> {
        Err(DomainError::StorageUnavailable("upstream unreachable".into()))
    }
}
