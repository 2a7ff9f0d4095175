//! Catalog builders for tests.

use votebox_core::catalog::{Catalog, Product};

/// Builds a catalog from `(id, name)` pairs.
#[must_use]
pub fn catalog_of(products: &[(&str, &str)]) -> Catalog {
    Catalog::new(products.iter().map(|(id, name)| Product::new(*id, *name)))
}
