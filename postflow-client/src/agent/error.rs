//! Error taxonomy for agent calls

use postflow_core::domain::workflow::Stage;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for agent operations
pub type AgentResult<T> = std::result::Result<T, AgentError>;

/// What went wrong during an agent call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    /// No complete response within the call timeout
    Timeout,
    /// The agent could not be reached
    ConnectionRefused,
    /// The agent answered with a status other than 200
    BadStatus(u16),
    /// The payload was valid but its text was missing or too short
    EmptyResponse,
    /// Anything else: invalid JSON, unexpected shape, agent-reported error
    Malformed,
}

impl fmt::Display for AgentErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentErrorKind::Timeout => f.write_str("timeout"),
            AgentErrorKind::ConnectionRefused => f.write_str("connection refused"),
            AgentErrorKind::BadStatus(status) => write!(f, "bad status {}", status),
            AgentErrorKind::EmptyResponse => f.write_str("empty response"),
            AgentErrorKind::Malformed => f.write_str("malformed response"),
        }
    }
}

/// Failure of a single pipeline stage
///
/// Propagated unchanged from the stage clients to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} failed with {kind}: {detail}")]
pub struct AgentError {
    pub stage: Stage,
    pub kind: AgentErrorKind,
    pub detail: String,
}

impl AgentError {
    pub fn new(stage: Stage, kind: AgentErrorKind, detail: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            detail: detail.into(),
        }
    }

    /// Classifies a transport-level reqwest failure
    pub(crate) fn from_transport(stage: Stage, err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::new(
                stage,
                AgentErrorKind::Timeout,
                format!("no response within {}s", timeout.as_secs_f64()),
            )
        } else if err.is_connect() {
            Self::new(stage, AgentErrorKind::ConnectionRefused, err.to_string())
        } else {
            Self::new(stage, AgentErrorKind::Malformed, err.to_string())
        }
    }
}
