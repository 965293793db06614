//! Postflow Orchestrator
//!
//! Gateway process that runs the three-stage post pipeline against the two
//! generation agents and keeps a history of completed runs.
//!
//! Architecture:
//! - Configuration: load settings from environment or defaults
//! - Repository: file-backed storage of completed results
//! - Service: agent readiness probing and the pipeline state machine
//! - API: axum gateway in front of the service

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postflow_client::agent::{Agent1Client, Agent2Client, AgentClient};

pub mod api;
pub mod config;
pub mod repository;
pub mod service;
#[cfg(test)]
mod testing;

use crate::config::Config;
use crate::repository::FileResultStore;
use crate::service::Orchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "postflow_orchestrator=debug,postflow_client=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Postflow Orchestrator...");

    let config = Config::load().context("Invalid configuration")?;

    let store = FileResultStore::open(&config.history_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to open history directory {}",
                config.history_dir.display()
            )
        })?;
    info!("Saving results under {}", store.dir().display());

    let agent1 = Agent1Client::from_client(
        AgentClient::new(config.agent1_url.clone(), config.agent_timeout)
            .with_health_timeout(config.health_timeout),
    );
    let agent2 = Agent2Client::from_client(
        AgentClient::new(config.agent2_url.clone(), config.agent_timeout)
            .with_health_timeout(config.health_timeout),
    );

    info!("Agent1 at {}", agent1.base_url());
    info!("Agent2 at {}", agent2.base_url());

    let orchestrator = Orchestrator::new(Arc::new(agent1), Arc::new(agent2), Arc::new(store));

    if config.wait_for_agents {
        if let Err(e) = orchestrator
            .verify_agents_healthy(config.health_retries, config.health_retry_delay)
            .await
        {
            if config.require_agents {
                return Err(e).context("Agents did not become ready");
            }
            warn!("{}; serving anyway, runs will fail until they are up", e);
        }
    }

    // Build router with all API endpoints
    let app = api::create_router(api::AppState {
        orchestrator,
        history_limit: config.history_limit,
        workflow_deadline: config.workflow_deadline,
    });

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Postflow Orchestrator stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
