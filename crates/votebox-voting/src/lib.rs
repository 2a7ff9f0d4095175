//! Votebox — session-scoped voting and aggregation context.
//!
//! Responsible for anonymous session identity, vote validation and
//! submission, per-product aggregation, and keeping the product catalog
//! snapshot fresh.

pub mod application;
pub mod domain;
