//! The conversational collaborator seam.
//!
//! Free-form questions are answered by something outside this workspace
//! (typically a retrieval-augmented language model). The core only defines
//! the contract: a question plus an opaque session id in, either text or a
//! structured build out. Session history, retrieval and prompting are the
//! implementor's business.

use crate::build::BuildSummary;
use crate::error::ChatError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What an answerer produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Answer {
    Text(String),
    Build(BuildSummary),
}

#[async_trait]
pub trait Answerer: Send + Sync {
    /// Implementation name (for logs and status output).
    fn name(&self) -> &str;

    /// Answer a question within a session.
    async fn answer(&self, question: &str, session_id: &str) -> Result<Answer, ChatError>;
}
