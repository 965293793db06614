//! History endpoints

use crate::GatewayClient;
use crate::error::Result;
use postflow_core::domain::history::HistoryEntry;
use postflow_core::domain::workflow::WorkflowResult;
use postflow_core::dto::gateway::HistoryResponse;

impl GatewayClient {
    // =============================================================================
    // History
    // =============================================================================

    /// List the most recent saved results, newest first
    pub async fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        let url = format!("{}/api/history", self.base_url);
        let response = self.client.get(&url).send().await?;

        let body: HistoryResponse = self.handle_response(response).await?;
        Ok(body.history)
    }

    /// Fetch one saved result by filename
    pub async fn get_history(&self, filename: &str) -> Result<WorkflowResult> {
        let url = format!("{}/api/history/{}", self.base_url, filename);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
