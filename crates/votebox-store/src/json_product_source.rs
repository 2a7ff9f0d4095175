//! Product source backed by a JSON file holding an array of
//! `{"id": ..., "name": ...}` objects.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use votebox_core::catalog::Product;
use votebox_core::error::DomainError;
use votebox_core::repository::ProductSource;

/// Reads products from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileProductSource {
    path: PathBuf,
}

impl JsonFileProductSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProductSource for JsonFileProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, DomainError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::StorageUnavailable(format!("reading {}: {e}", self.path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::StorageUnavailable(format!("parsing {}: {e}", self.path.display()))
        })
    }
}
