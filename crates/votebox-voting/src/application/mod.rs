//! Application services that orchestrate the voting domain over storage.

pub mod catalog_refresh;
pub mod command_handlers;
pub mod deadline;
pub mod query_handlers;
pub mod service;
