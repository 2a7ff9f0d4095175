//! Votebox Core — shared domain abstractions.
//!
//! This crate defines the vote and product types, the error taxonomy, and
//! the storage capabilities that the voting context and the infrastructure
//! crates agree on. It contains no infrastructure code.

pub mod catalog;
pub mod command;
pub mod error;
pub mod repository;
pub mod vote;
