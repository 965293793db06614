//! Post Generation API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use postflow_core::domain::workflow::{PipelineRequest, WorkflowResult};
use tokio::time::Instant;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// POST /api/generate-post
/// Run the pipeline once and return the saved result
pub async fn generate_post(
    State(state): State<AppState>,
    payload: Result<Json<PipelineRequest>, JsonRejection>,
) -> ApiResult<Json<WorkflowResult>> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    tracing::info!("Generating post for topic: {}", req.topic);

    let result = match state.workflow_deadline {
        Some(limit) => {
            state
                .orchestrator
                .run_workflow_with_deadline(req, Some(Instant::now() + limit))
                .await?
        }
        None => state.orchestrator.run_workflow(req).await?,
    };

    Ok(Json(result))
}
