//! Workflow domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tone used when the caller does not pick one
pub const DEFAULT_TONE: &str = "criativo";

/// Audience used when the caller does not pick one
pub const DEFAULT_TARGET_AUDIENCE: &str = "público geral";

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

fn default_target_audience() -> String {
    DEFAULT_TARGET_AUDIENCE.to_string()
}

/// Input of a single pipeline run
///
/// Lives only for the duration of one run and is echoed back as the
/// `metadata` of the resulting [`WorkflowResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub topic: String,
    pub style: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_target_audience")]
    pub target_audience: String,
}

impl PipelineRequest {
    /// Creates a request with the default tone and audience
    pub fn new(topic: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            style: style.into(),
            tone: default_tone(),
            target_audience: default_target_audience(),
        }
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_target_audience(mut self, target_audience: impl Into<String>) -> Self {
        self.target_audience = target_audience.into();
        self
    }

    /// Checks that every field carries a non-blank value
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("topic", &self.topic),
            ("style", &self.style),
            ("tone", &self.tone),
            ("target_audience", &self.target_audience),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("{} cannot be empty", name));
            }
        }

        Ok(())
    }
}

/// One of the three ordered steps of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Draft generation on the first agent
    Agent1,
    /// Draft refinement on the second agent
    Agent2Improve,
    /// Image description on the second agent
    Agent2Image,
}

impl Stage {
    /// Position of the stage in the pipeline, starting at 1
    pub fn step(&self) -> u8 {
        match self {
            Stage::Agent1 => 1,
            Stage::Agent2Improve => 2,
            Stage::Agent2Image => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Agent1 => "agent1:draft",
            Stage::Agent2Improve => "agent2:improve",
            Stage::Agent2Image => "agent2:image",
        };
        f.write_str(name)
    }
}

/// Output record of a successful run
///
/// Built once by the orchestrator after all three stages succeed and never
/// mutated afterwards. This is also the layout of the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub draft: String,
    pub final_post: String,
    pub image_prompt: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: PipelineRequest,
}
