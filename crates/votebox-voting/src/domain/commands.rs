//! Commands for the voting context.

use uuid::Uuid;
use votebox_core::command::Command;

/// Command to cast or replace a session's vote for a product.
#[derive(Debug, Clone)]
pub struct SubmitVote {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The voter's session token.
    pub session_id: String,
    /// The product being rated.
    pub product_id: String,
    /// The requested rating, unvalidated.
    pub rate: i64,
}

impl Command for SubmitVote {
    fn command_type(&self) -> &'static str {
        "voting.submit_vote"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
