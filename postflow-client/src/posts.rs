//! Post generation and health endpoints

use crate::GatewayClient;
use crate::error::Result;
use postflow_core::domain::workflow::{PipelineRequest, WorkflowResult};
use postflow_core::dto::gateway::{AgentsHealth, ServiceHealth};

impl GatewayClient {
    // =============================================================================
    // Post Generation
    // =============================================================================

    /// Run the full pipeline for a request
    ///
    /// Blocks until all three stages finished, which may take minutes.
    /// Failures keep the gateway's status (503/504 when an agent was
    /// unreachable or too slow).
    pub async fn generate_post(&self, req: &PipelineRequest) -> Result<WorkflowResult> {
        let url = format!("{}/api/generate-post", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Health
    // =============================================================================

    /// Liveness of the gateway itself
    pub async fn health(&self) -> Result<ServiceHealth> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Readiness of both agents as seen by the gateway
    pub async fn agents_health(&self) -> Result<AgentsHealth> {
        let url = format!("{}/api/agents/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
