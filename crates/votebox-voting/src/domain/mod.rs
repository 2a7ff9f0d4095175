//! Pure domain logic for the voting context.

pub mod aggregation;
pub mod commands;
pub mod rating;
pub mod session;
