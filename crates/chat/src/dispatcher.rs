//! Chat request dispatch.

use crate::budget::extract_budget;
use rigsmith_core::error::ChatError;
use rigsmith_core::{Answer, Answerer, Build, BuildItem, CompatibilityIssue, Preferences};
use rigsmith_engine::BuildService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// How a chat message should be handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Discuss,
    Build,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub mode: ChatMode,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, mode: ChatMode) -> Self {
        Self {
            message: message.into(),
            session_id: None,
            mode,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Text,
    Build,
}

/// A build attached to a chat response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildData {
    pub components: Vec<BuildItem>,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_budget: Option<f64>,
    #[serde(default)]
    pub compatibility_issues: Vec<CompatibilityIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BuildData>,
    pub session_id: String,
}

/// Routes chat messages to the optimizer or to the answerer.
pub struct ChatDispatcher {
    service: Arc<BuildService>,
    answerer: Arc<dyn Answerer>,
    default_budget: f64,
}

impl ChatDispatcher {
    pub fn new(service: Arc<BuildService>, answerer: Arc<dyn Answerer>, default_budget: f64) -> Self {
        Self {
            service,
            answerer,
            default_budget,
        }
    }

    pub fn answerer_name(&self) -> &str {
        self.answerer.name()
    }

    pub fn default_budget(&self) -> f64 {
        self.default_budget
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let session_id = match request.session_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => Uuid::new_v4().simple().to_string(),
        };

        match request.mode {
            ChatMode::Build => Ok(self.build_from_message(message, session_id)),
            ChatMode::Discuss => self.discuss(message, session_id).await,
        }
    }

    fn build_from_message(&self, message: &str, session_id: String) -> ChatResponse {
        let budget = extract_budget(message).unwrap_or(self.default_budget);
        debug!(session_id = %session_id, budget, "Build requested from chat");

        let result = self.service.optimize(budget, &Preferences::default());
        let content = describe_build(&result.build, budget, result.compatibility_issues.len());

        ChatResponse {
            content,
            kind: ResponseKind::Build,
            data: Some(BuildData {
                components: result.build.items(),
                total_price: result.build.total_price(),
                requested_budget: Some(budget),
                compatibility_issues: result.compatibility_issues,
            }),
            session_id,
        }
    }

    async fn discuss(&self, message: &str, session_id: String) -> Result<ChatResponse, ChatError> {
        let answer = self.answerer.answer(message, &session_id).await?;
        info!(session_id = %session_id, answerer = self.answerer.name(), "Discussion answered");

        Ok(match answer {
            Answer::Text(content) => ChatResponse {
                content,
                kind: ResponseKind::Text,
                data: None,
                session_id,
            },
            Answer::Build(summary) => {
                let mut build = Build::new();
                for (category, component) in summary.components {
                    build.add_or_replace(category, component);
                }
                let compatibility_issues = self.service.check(&build);
                ChatResponse {
                    content: format!(
                        "Suggested build with {} components, total ${:.2}.",
                        build.len(),
                        build.total_price()
                    ),
                    kind: ResponseKind::Build,
                    data: Some(BuildData {
                        components: build.items(),
                        total_price: build.total_price(),
                        requested_budget: None,
                        compatibility_issues,
                    }),
                    session_id,
                }
            }
        })
    }
}

fn describe_build(build: &Build, budget: f64, issue_count: usize) -> String {
    if build.is_empty() {
        return format!("Nothing in the catalog fits a ${budget:.0} budget.");
    }

    let mut content = format!(
        "Here is a build for a ${budget:.0} budget: {} components, total ${:.2}.",
        build.len(),
        build.total_price()
    );
    if issue_count > 0 {
        content.push_str(&format!(" {issue_count} compatibility issue(s) need attention."));
    }
    content
}
