//! API Module
//!
//! HTTP gateway in front of the orchestrator.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod health;
pub mod history;
pub mod posts;

use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::Orchestrator;

/// Shared state of the gateway handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
    /// Number of entries returned by the history listing
    pub history_limit: usize,
    /// Overall deadline applied to each run, if any
    pub workflow_deadline: Option<Duration>,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(health::health_check))
        .route("/api/agents/health", get(health::agents_health))
        // Pipeline
        .route("/api/generate-post", post(posts::generate_post))
        // History
        .route("/api/history", get(history::list_history))
        .route("/api/history/{filename}", get(history::get_history_item))
        .route("/api/download/{filename}", get(history::download))
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
