//! Fallback answerer used when no discussion model is wired in.

use async_trait::async_trait;
use rigsmith_core::error::ChatError;
use rigsmith_core::{Answer, Answerer};
use tracing::debug;

pub const UNCONFIGURED_REPLY: &str = "No discussion assistant is configured on this server. \
Switch to build mode and include a budget (for example \"$1200\") to get a parts list.";

/// Replies to every question with a fixed explanation.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredAnswerer;

#[async_trait]
impl Answerer for UnconfiguredAnswerer {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn answer(&self, _question: &str, session_id: &str) -> Result<Answer, ChatError> {
        debug!(session_id, "Discussion requested without an answerer");
        Ok(Answer::Text(UNCONFIGURED_REPLY.to_string()))
    }
}
