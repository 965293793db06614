//! Gateway DTOs

use serde::{Deserialize, Serialize};

use crate::domain::history::HistoryEntry;

/// Error body returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Response of `GET /api/history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

/// Liveness of the gateway itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub service: String,
}

/// Readiness of the two generation agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentsHealth {
    pub agent1: bool,
    pub agent2: bool,
    pub ready: bool,
}

impl AgentsHealth {
    pub fn new(agent1: bool, agent2: bool) -> Self {
        Self {
            agent1,
            agent2,
            ready: agent1 && agent2,
        }
    }
}
