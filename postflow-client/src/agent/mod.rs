//! Agent clients
//!
//! HTTP clients for the two external generation agents:
//! - [`AgentClient`]: the shared "POST JSON, expect 200 and JSON back" call
//! - [`Agent1Client`]: draft generation
//! - [`Agent2Client`]: draft refinement and image description
//!
//! The orchestrator depends on the [`DraftAgent`] and [`RefineAgent`] traits
//! rather than on the concrete clients, so fakes can stand in for tests.

mod draft;
pub mod error;
mod refine;

pub use draft::Agent1Client;
pub use error::{AgentError, AgentErrorKind, AgentResult};
pub use refine::Agent2Client;

use async_trait::async_trait;
use postflow_core::domain::workflow::Stage;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default timeout of a pipeline stage call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Default timeout of a health probe
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Body text longer than this is cut in log lines
const LOG_BODY_LIMIT: usize = 200;

/// Capability of the draft-generation agent
#[async_trait]
pub trait DraftAgent: Send + Sync {
    /// Whether the agent currently answers its health probe
    ///
    /// Never fails: any problem is reported as "not ready".
    async fn health(&self) -> bool;

    /// Generates a first draft for the given topic
    async fn generate_draft(&self, topic: &str, style: &str, tone: &str) -> AgentResult<String>;
}

/// Capability of the refine/describe agent
#[async_trait]
pub trait RefineAgent: Send + Sync {
    /// Whether the agent currently answers its health probe
    async fn health(&self) -> bool;

    /// Rewrites a draft for the target audience
    async fn improve(&self, draft_text: &str, target_audience: &str) -> AgentResult<String>;

    /// Produces a textual image description for a finished post
    async fn generate_image_prompt(&self, post_text: &str) -> AgentResult<String>;
}

/// Shared HTTP plumbing for the agent clients
#[derive(Debug, Clone)]
pub struct AgentClient {
    /// Base URL of the agent (e.g., "http://agent1-local:8001")
    base_url: String,
    /// Timeout applied to every stage call
    timeout: Duration,
    /// Timeout applied to health probes
    health_timeout: Duration,
    /// HTTP client instance
    client: Client,
}

impl AgentClient {
    /// Creates a client for the agent at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(base_url, timeout, Client::new())
    }

    /// Creates a client reusing a configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, timeout: Duration, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            client,
        }
    }

    /// Overrides the health probe timeout
    pub fn with_health_timeout(mut self, health_timeout: Duration) -> Self {
        self.health_timeout = health_timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `body` to `path` and decodes the JSON answer
    ///
    /// Only a 200 with a decodable body counts as success; every failure is
    /// tagged with `stage`. One log line is written per call.
    pub async fn call<B, T>(&self, stage: Stage, path: &str, body: &B) -> AgentResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let started = Instant::now();
        let outcome = self.send(stage, path, body).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(_) => info!(stage = %stage, path, elapsed_ms, outcome = "ok", "agent call completed"),
            Err(err) => warn!(
                stage = %stage,
                path,
                elapsed_ms,
                outcome = %err.kind,
                detail = %truncate(&err.detail, LOG_BODY_LIMIT),
                "agent call failed"
            ),
        }

        outcome
    }

    async fn send<B, T>(&self, stage: Stage, path: &str, body: &B) -> AgentResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| AgentError::from_transport(stage, &e, self.timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AgentError::from_transport(stage, &e, self.timeout))?;

        if status != StatusCode::OK {
            return Err(AgentError::new(
                stage,
                AgentErrorKind::BadStatus(status.as_u16()),
                text,
            ));
        }

        serde_json::from_str(&text).map_err(|e| {
            AgentError::new(
                stage,
                AgentErrorKind::Malformed,
                format!("unexpected response body: {}", e),
            )
        })
    }

    /// GETs the agent root with the short health timeout
    ///
    /// Ready means a 200 carrying a JSON body. Failures are logged at debug
    /// and reported as `false`.
    pub async fn probe(&self) -> bool {
        let url = format!("{}/", self.base_url);

        let response = match self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Agent at {} not ready yet: {}", self.base_url, e);
                return false;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(
                "Agent at {} answered health probe with {}",
                self.base_url,
                response.status()
            );
            return false;
        }

        match response.json::<serde_json::Value>().await {
            Ok(_) => true,
            Err(e) => {
                debug!("Agent at {} sent a non-JSON health body: {}", self.base_url, e);
                false
            }
        }
    }
}

/// Requires at least `min_chars` characters in `text` as received and
/// returns it trimmed
pub(crate) fn require_text(
    stage: Stage,
    field: &str,
    text: &str,
    min_chars: usize,
) -> AgentResult<String> {
    let chars = text.chars().count();

    if chars < min_chars {
        return Err(AgentError::new(
            stage,
            AgentErrorKind::EmptyResponse,
            format!(
                "{} has {} characters, expected at least {}",
                field, chars, min_chars
            ),
        ));
    }

    Ok(text.trim().to_string())
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push('…');
    cut
}
