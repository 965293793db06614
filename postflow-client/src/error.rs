//! Error types for the gateway client

use thiserror::Error;

/// Result type alias for gateway client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the gateway
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Gateway returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// `detail` from the error body, or the raw body
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if the gateway could not reach an agent in time
    pub fn is_agent_unavailable(&self) -> bool {
        matches!(self, Self::ApiError { status: 503 | 504, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        assert!(ClientError::api_error(404, "File not found").is_not_found());
        assert!(ClientError::api_error(503, "down").is_agent_unavailable());
        assert!(ClientError::api_error(504, "slow").is_agent_unavailable());
        assert!(!ClientError::api_error(500, "boom").is_agent_unavailable());
    }
}
