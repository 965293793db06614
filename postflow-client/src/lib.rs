//! Postflow HTTP Clients
//!
//! Type-safe HTTP clients for the Postflow system:
//! - [`agent`]: clients for the two external generation agents, used by the orchestrator
//! - [`GatewayClient`]: client for the gateway API, used by the CLI
//!
//! # Example
//!
//! ```no_run
//! use postflow_client::GatewayClient;
//! use postflow_core::domain::workflow::PipelineRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GatewayClient::new("http://localhost:8000");
//!
//!     let result = client
//!         .generate_post(&PipelineRequest::new("AI", "tech"))
//!         .await?;
//!
//!     println!("{}", result.final_post);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod error;
mod history;
mod posts;

// Re-export commonly used types
pub use agent::{
    Agent1Client, Agent2Client, AgentClient, AgentError, AgentErrorKind, DraftAgent, RefineAgent,
};
pub use error::{ClientError, Result};

use postflow_core::dto::gateway::ErrorBody;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the gateway API
#[derive(Debug, Clone)]
pub struct GatewayClient {
    /// Base URL of the gateway (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl GatewayClient {
    /// Create a new gateway client
    ///
    /// # Example
    /// ```
    /// use postflow_client::GatewayClient;
    ///
    /// let client = GatewayClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new gateway client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Error responses carry a `{detail}` body; its text becomes the error
    /// message, falling back to the raw body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .map(|body| body.detail)
                .unwrap_or(error_text);
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GatewayClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GatewayClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
