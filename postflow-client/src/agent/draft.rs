//! Draft-generation agent client

use async_trait::async_trait;
use postflow_core::domain::workflow::Stage;
use postflow_core::dto::agent::{DraftRequest, DraftResponse};
use std::time::Duration;

use super::{AgentClient, AgentError, AgentErrorKind, AgentResult, DraftAgent, require_text};

const GENERATE_DRAFT_PATH: &str = "/api/tools/generate_draft";

/// Shortest draft accepted from the agent
pub const MIN_DRAFT_CHARS: usize = 10;

/// Client for the draft-generation agent
#[derive(Debug, Clone)]
pub struct Agent1Client {
    inner: AgentClient,
}

impl Agent1Client {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self::from_client(AgentClient::new(base_url, timeout))
    }

    pub fn from_client(inner: AgentClient) -> Self {
        Self { inner }
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }
}

#[async_trait]
impl DraftAgent for Agent1Client {
    async fn health(&self) -> bool {
        self.inner.probe().await
    }

    async fn generate_draft(&self, topic: &str, style: &str, tone: &str) -> AgentResult<String> {
        let request = DraftRequest {
            topic: topic.to_string(),
            style: style.to_string(),
            tone: tone.to_string(),
        };

        let response: DraftResponse = self
            .inner
            .call(Stage::Agent1, GENERATE_DRAFT_PATH, &request)
            .await?;

        if let Some(reported) = response.error.as_deref().filter(|e| !e.trim().is_empty()) {
            return Err(AgentError::new(
                Stage::Agent1,
                AgentErrorKind::Malformed,
                format!("agent reported an error: {}", reported),
            ));
        }

        require_text(
            Stage::Agent1,
            "draft text",
            response.content.text(),
            MIN_DRAFT_CHARS,
        )
    }
}
