//! `PostgreSQL` product source.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use votebox_core::catalog::Product;
use votebox_core::error::DomainError;
use votebox_core::repository::ProductSource;

use crate::storage_error;

const SELECT_PRODUCTS: &str = "SELECT id, name FROM products ORDER BY id";

const UPSERT_PRODUCT: &str = r"
INSERT INTO products (id, name)
VALUES ($1, $2)
ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
";

/// Reads the product catalog from the `products` table.
#[derive(Debug, Clone)]
pub struct PgProductSource {
    pool: PgPool,
}

impl PgProductSource {
    /// Creates a new `PgProductSource`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or renames `products` in a single transaction. Products
    /// already in the table but absent from `products` are left alone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StorageUnavailable` if any write fails; no
    /// product is written in that case.
    pub async fn seed(&self, products: &[Product]) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        for product in products {
            sqlx::query(UPSERT_PRODUCT)
                .bind(&product.id)
                .bind(&product.name)
                .execute(&mut *tx)
                .await
                .map_err(storage_error)?;
        }
        tx.commit().await.map_err(storage_error)?;

        info!(products = products.len(), "product table seeded");
        Ok(products.len())
    }
}

#[async_trait]
impl ProductSource for PgProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, DomainError> {
        let rows = sqlx::query_as::<_, (String, String)>(SELECT_PRODUCTS)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| Product { id, name })
            .collect())
    }
}
