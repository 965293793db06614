//! API Error Handling
//!
//! Unified error types and conversion for API responses. Every error is
//! rendered as `{"detail": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use postflow_client::agent::{AgentError, AgentErrorKind};
use postflow_core::dto::gateway::ErrorBody;

use crate::repository::StoreError;
use crate::service::WorkflowError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Agent(AgentError),
    Unavailable(String),
    InternalError(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Agent(err) => match err.kind {
                AgentErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
                AgentErrorKind::ConnectionRefused => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Unavailable(msg) => {
                msg
            }
            ApiError::Agent(err) => {
                tracing::error!("Workflow failed at {}: {}", err.stage, err);
                err.to_string()
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                msg
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            WorkflowError::Agent(err) => ApiError::Agent(err),
            WorkflowError::Storage(err) => err.into(),
            err @ WorkflowError::AgentsNotReady { .. } => ApiError::Unavailable(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) | StoreError::InvalidFilename(_) => {
                ApiError::NotFound("File not found".to_string())
            }
            StoreError::Io(_) | StoreError::Serialization(_) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use postflow_core::domain::workflow::Stage;

    fn status_for(kind: AgentErrorKind) -> StatusCode {
        ApiError::Agent(AgentError::new(Stage::Agent1, kind, "x"))
            .into_response()
            .status()
    }

    #[test]
    fn test_agent_error_status_mapping() {
        assert_eq!(status_for(AgentErrorKind::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_for(AgentErrorKind::ConnectionRefused),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(AgentErrorKind::BadStatus(404)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(AgentErrorKind::EmptyResponse),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(AgentErrorKind::Malformed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_mapping() {
        let err: ApiError = StoreError::InvalidFilename("../x".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err: ApiError = WorkflowError::AgentsNotReady { attempts: 3 }.into();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
