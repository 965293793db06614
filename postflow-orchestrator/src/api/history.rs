//! History API Handlers
//!
//! Listing and retrieval of saved workflow results.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use postflow_core::dto::gateway::HistoryResponse;

use crate::api::AppState;
use crate::api::error::ApiResult;

/// GET /api/history
/// Most recent saved results, newest first
pub async fn list_history(State(state): State<AppState>) -> ApiResult<Json<HistoryResponse>> {
    tracing::debug!("Listing history");

    let history = state
        .orchestrator
        .store()
        .list(state.history_limit)
        .await?;

    Ok(Json(HistoryResponse { history }))
}

/// GET /api/history/{filename}
/// The stored document, as saved
pub async fn get_history_item(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    tracing::debug!("Getting history item: {}", filename);

    let document = state.orchestrator.store().read_document(&filename).await?;

    Ok(([(header::CONTENT_TYPE, "application/json".to_string())], document))
}

/// GET /api/download/{filename}
/// The stored document as a file attachment
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    tracing::debug!("Downloading history item: {}", filename);

    let document = state.orchestrator.store().read_document(&filename).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        document,
    ))
}
