//! Shared application state.

use std::sync::Arc;

use votebox_voting::application::service::VotingService;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The voting service all routes delegate to.
    pub voting: Arc<VotingService>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(voting: VotingService) -> Self {
        Self {
            voting: Arc::new(voting),
        }
    }
}
