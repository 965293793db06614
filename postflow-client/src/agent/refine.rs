//! Refine/describe agent client

use async_trait::async_trait;
use postflow_core::domain::workflow::Stage;
use postflow_core::dto::agent::{
    IMAGE_STYLE, ImageRequest, ImageResponse, ImproveRequest, ImproveResponse,
};
use std::time::Duration;
use tracing::debug;

use super::{AgentClient, AgentResult, RefineAgent, require_text};

const IMPROVE_PATH: &str = "/improve";
const GENERATE_IMAGE_PATH: &str = "/generate-image";

/// Shortest refined post accepted from the agent
pub const MIN_IMPROVED_CHARS: usize = 10;

/// Shortest image description accepted from the agent
pub const MIN_IMAGE_PROMPT_CHARS: usize = 5;

/// Client for the refine/describe agent
#[derive(Debug, Clone)]
pub struct Agent2Client {
    inner: AgentClient,
}

impl Agent2Client {
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
impl RefineAgent for Agent2Client {
    async fn health(&self) -> bool {
        self.inner.probe().await
    }

    async fn improve(&self, draft_text: &str, target_audience: &str) -> AgentResult<String> {
        let request = ImproveRequest {
            draft_text: draft_text.to_string(),
            target_audience: target_audience.to_string(),
        };

        let response: ImproveResponse = self
            .inner
            .call(Stage::Agent2Improve, IMPROVE_PATH, &request)
            .await?;

        debug!(
            model = response.model.as_deref().unwrap_or("unknown"),
            hashtags = response.hashtags.len(),
            "Refinement received"
        );

        require_text(
            Stage::Agent2Improve,
            "improved_text",
            &response.improved_text,
            MIN_IMPROVED_CHARS,
        )
    }

    async fn generate_image_prompt(&self, post_text: &str) -> AgentResult<String> {
        let request = ImageRequest {
            prompt: post_text.to_string(),
            style: IMAGE_STYLE.to_string(),
        };

        let response: ImageResponse = self
            .inner
            .call(Stage::Agent2Image, GENERATE_IMAGE_PATH, &request)
            .await?;

        require_text(
            Stage::Agent2Image,
            "image_path",
            &response.image_path,
            MIN_IMAGE_PROMPT_CHARS,
        )
    }
}
