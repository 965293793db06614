//! Health Check API Handlers
//!
//! Liveness of the gateway and readiness of the agents behind it.

use axum::{Json, extract::State};
use postflow_core::dto::gateway::{AgentsHealth, ServiceHealth};

use crate::api::AppState;

/// GET /health
/// Liveness of the gateway itself; never contacts the agents
pub async fn health_check() -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "ok".to_string(),
        service: "postflow-gateway".to_string(),
    })
}

/// GET /api/agents/health
/// One probe of each agent, no retry
pub async fn agents_health(State(state): State<AppState>) -> Json<AgentsHealth> {
    let health = state.orchestrator.probe_agents().await;
    tracing::debug!(
        "Agent readiness: agent1={}, agent2={}",
        health.agent1,
        health.agent2
    );
    Json(health)
}
