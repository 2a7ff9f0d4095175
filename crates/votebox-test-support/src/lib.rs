//! Shared test doubles and utilities for Votebox.

mod catalog;
mod product_source;
mod vote_store;

pub use catalog::catalog_of;
pub use product_source::{FailingProductSource, StaticProductSource};
pub use vote_store::{FailingVoteStore, InMemoryVoteStore, SlowVoteStore};
