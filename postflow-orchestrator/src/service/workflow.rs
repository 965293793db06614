//! Workflow Service
//!
//! Drives the fixed three-stage pipeline across the two agents:
//!
//! ```text
//! Start -> DraftGenerated -> Refined -> ImagePromptGenerated -> Complete
//! ```
//!
//! Any stage failure ends the run with the stage-tagged [`AgentError`].
//! Only a run that reaches `Complete` is persisted, so partial results
//! never reach the store. No stage is retried; the only retry loop is the
//! readiness probe in [`Orchestrator::verify_agents_healthy`].

use chrono::Utc;
use postflow_client::agent::{AgentError, AgentErrorKind, AgentResult, DraftAgent, RefineAgent};
use postflow_core::domain::workflow::{PipelineRequest, Stage, WorkflowResult};
use postflow_core::dto::gateway::AgentsHealth;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::repository::{ResultStore, StoreError};

/// Service error type
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("failed to persist result: {0}")]
    Storage(#[from] StoreError),

    #[error("agents not ready after {attempts} attempt(s)")]
    AgentsNotReady { attempts: u32 },
}

pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Progress of a single run
enum RunState {
    Start,
    DraftGenerated {
        draft: String,
    },
    Refined {
        draft: String,
        final_post: String,
    },
    ImagePromptGenerated {
        draft: String,
        final_post: String,
        image_prompt: String,
    },
}

/// Coordinates the two agents and the result store
#[derive(Clone)]
pub struct Orchestrator {
    agent1: Arc<dyn DraftAgent>,
    agent2: Arc<dyn RefineAgent>,
    store: Arc<dyn ResultStore>,
}

impl Orchestrator {
    pub fn new(
        agent1: Arc<dyn DraftAgent>,
        agent2: Arc<dyn RefineAgent>,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            agent1,
            agent2,
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn ResultStore> {
        &self.store
    }

    /// Probes both agents once, concurrently
    pub async fn probe_agents(&self) -> AgentsHealth {
        let (agent1, agent2) = tokio::join!(self.agent1.health(), self.agent2.health());
        AgentsHealth::new(agent1, agent2)
    }

    /// Waits until both agents answer their health probe
    ///
    /// Probes up to `max_attempts` times, sleeping `delay` between attempts
    /// but never after a successful one. Returns the attempt that succeeded.
    pub async fn verify_agents_healthy(&self, max_attempts: u32, delay: Duration) -> Result<u32> {
        info!(
            "Checking agent health (up to {} attempt(s))...",
            max_attempts
        );

        for attempt in 1..=max_attempts {
            let health = self.probe_agents().await;

            if health.ready {
                info!("Both agents healthy after {} attempt(s)", attempt);
                return Ok(attempt);
            }

            if attempt < max_attempts {
                info!(
                    agent1 = health.agent1,
                    agent2 = health.agent2,
                    "Attempt {}/{}: agents still starting",
                    attempt,
                    max_attempts
                );
                tokio::time::sleep(delay).await;
            }
        }

        error!("Agents not ready after {} attempt(s)", max_attempts);
        Err(WorkflowError::AgentsNotReady {
            attempts: max_attempts,
        })
    }

    /// Runs the pipeline for `request` and persists the result
    pub async fn run_workflow(&self, request: PipelineRequest) -> Result<WorkflowResult> {
        self.run_workflow_with_deadline(request, None).await
    }

    /// Runs the pipeline, aborting the in-flight stage once `deadline` passes
    ///
    /// An elapsed deadline fails with `Timeout` tagged with the stage that
    /// was running. Nothing is persisted for an aborted run.
    pub async fn run_workflow_with_deadline(
        &self,
        request: PipelineRequest,
        deadline: Option<Instant>,
    ) -> Result<WorkflowResult> {
        request.validate().map_err(WorkflowError::InvalidRequest)?;

        info!(
            topic = %request.topic,
            style = %request.style,
            tone = %request.tone,
            target_audience = %request.target_audience,
            "Starting workflow"
        );

        let result = match self.drive(&request, deadline).await {
            Ok(result) => result,
            Err(err) => {
                error!(stage = %err.stage, kind = %err.kind, "Workflow failed: {}", err);
                return Err(err.into());
            }
        };

        let filename = self.store.save(&result).await?;
        info!("Workflow complete, saved as {}", filename);

        Ok(result)
    }

    async fn drive(
        &self,
        request: &PipelineRequest,
        deadline: Option<Instant>,
    ) -> AgentResult<WorkflowResult> {
        let mut state = RunState::Start;

        loop {
            state = match state {
                RunState::Start => {
                    let draft = bounded(
                        Stage::Agent1,
                        deadline,
                        self.agent1
                            .generate_draft(&request.topic, &request.style, &request.tone),
                    )
                    .await?;
                    log_transition(Stage::Agent1, "draft generated", &draft);
                    RunState::DraftGenerated { draft }
                }
                RunState::DraftGenerated { draft } => {
                    let final_post = bounded(
                        Stage::Agent2Improve,
                        deadline,
                        self.agent2.improve(&draft, &request.target_audience),
                    )
                    .await?;
                    log_transition(Stage::Agent2Improve, "post refined", &final_post);
                    RunState::Refined { draft, final_post }
                }
                RunState::Refined { draft, final_post } => {
                    let image_prompt = bounded(
                        Stage::Agent2Image,
                        deadline,
                        self.agent2.generate_image_prompt(&final_post),
                    )
                    .await?;
                    log_transition(Stage::Agent2Image, "image prompt generated", &image_prompt);
                    RunState::ImagePromptGenerated {
                        draft,
                        final_post,
                        image_prompt,
                    }
                }
                RunState::ImagePromptGenerated {
                    draft,
                    final_post,
                    image_prompt,
                } => {
                    return Ok(WorkflowResult {
                        draft,
                        final_post,
                        image_prompt,
                        timestamp: Utc::now(),
                        metadata: request.clone(),
                    });
                }
            };
        }
    }
}

/// Awaits one stage call, bounded by the run deadline
///
/// Errors are re-tagged with `stage` so the failure always names the stage
/// the orchestrator was in.
async fn bounded<F>(stage: Stage, deadline: Option<Instant>, call: F) -> AgentResult<String>
where
    F: Future<Output = AgentResult<String>>,
{
    let outcome = match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, call)
            .await
            .unwrap_or_else(|_| {
                Err(AgentError::new(
                    stage,
                    AgentErrorKind::Timeout,
                    "workflow deadline exceeded",
                ))
            }),
        None => call.await,
    };

    outcome.map_err(|mut err| {
        err.stage = stage;
        err
    })
}

fn log_transition(stage: Stage, what: &str, output: &str) {
    info!(
        stage = %stage,
        chars = output.chars().count(),
        "Step {}/3: {}",
        stage.step(),
        what
    );
    debug!(stage = %stage, "Output:\n{}", output);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::FileResultStore;
    use crate::testing::{FakeDraftAgent, FakeRefineAgent};
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    const DRAFT: &str = "Exploring AI today! #tech";
    const FINAL_POST: &str = "Exploring AI today — a journey into automation.";
    const IMAGE_PROMPT: &str = "A futuristic desk with glowing circuits.";

    struct Harness {
        _dir: TempDir,
        store: Arc<FileResultStore>,
        agent1: Arc<FakeDraftAgent>,
        agent2: Arc<FakeRefineAgent>,
        orchestrator: Orchestrator,
    }

    async fn harness(agent1: FakeDraftAgent, agent2: FakeRefineAgent) -> Harness {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileResultStore::open(dir.path()).await.unwrap());
        let agent1 = Arc::new(agent1);
        let agent2 = Arc::new(agent2);
        let orchestrator = Orchestrator::new(agent1.clone(), agent2.clone(), store.clone());

        Harness {
            _dir: dir,
            store,
            agent1,
            agent2,
            orchestrator,
        }
    }

    fn scenario_request() -> PipelineRequest {
        PipelineRequest::new("AI", "tech")
            .with_tone("criativo")
            .with_target_audience("devs")
    }

    #[tokio::test]
    async fn test_scenario_produces_verbatim_result() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT),
        )
        .await;

        let result = h.orchestrator.run_workflow(scenario_request()).await.unwrap();

        assert_eq!(result.draft, DRAFT);
        assert_eq!(result.final_post, FINAL_POST);
        assert_eq!(result.image_prompt, IMAGE_PROMPT);
        assert_eq!(result.metadata, scenario_request());

        assert_eq!(
            *h.agent1.seen.lock().unwrap(),
            vec![("AI".to_string(), "tech".to_string(), "criativo".to_string())]
        );
        assert_eq!(
            *h.agent2.improve_inputs.lock().unwrap(),
            vec![(DRAFT.to_string(), "devs".to_string())]
        );
        assert_eq!(
            *h.agent2.image_inputs.lock().unwrap(),
            vec![FINAL_POST.to_string()]
        );
    }

    #[tokio::test]
    async fn test_success_is_persisted() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT),
        )
        .await;

        let result = h.orchestrator.run_workflow(scenario_request()).await.unwrap();

        let history = h.store.list(10).await.unwrap();
        assert_eq!(history.len(), 1);
        let stored = h.store.get(&history[0].filename).await.unwrap();
        assert_eq!(stored, result);
    }

    #[tokio::test]
    async fn test_defaults_are_echoed_in_metadata() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT),
        )
        .await;

        let request: PipelineRequest =
            serde_json::from_str(r#"{"topic": "AI", "style": "tech"}"#).unwrap();
        let result = h.orchestrator.run_workflow(request).await.unwrap();

        assert_eq!(result.metadata.tone, "criativo");
        assert_eq!(result.metadata.target_audience, "público geral");
    }

    #[tokio::test]
    async fn test_draft_failure_stops_pipeline() {
        let h = harness(
            FakeDraftAgent::failing(AgentErrorKind::BadStatus(500)),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT),
        )
        .await;

        let err = h.orchestrator.run_workflow(scenario_request()).await.unwrap_err();

        match err {
            WorkflowError::Agent(e) => {
                assert_eq!(e.stage, Stage::Agent1);
                assert_eq!(e.kind, AgentErrorKind::BadStatus(500));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(h.agent2.improve_calls.load(Ordering::SeqCst), 0);
        assert!(h.store.list(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_improve_failure_persists_nothing() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT)
                .improve_failing(AgentErrorKind::BadStatus(503)),
        )
        .await;

        let err = h.orchestrator.run_workflow(scenario_request()).await.unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Agent(AgentError { stage: Stage::Agent2Improve, .. })
        ));
        assert_eq!(h.agent2.image_calls.load(Ordering::SeqCst), 0);
        assert!(h.store.list(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_image_failure_persists_nothing() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT)
                .image_failing(AgentErrorKind::EmptyResponse),
        )
        .await;

        let err = h.orchestrator.run_workflow(scenario_request()).await.unwrap_err();

        match err {
            WorkflowError::Agent(e) => {
                assert_eq!(e.stage, Stage::Agent2Image);
                assert_eq!(e.kind, AgentErrorKind::EmptyResponse);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(h.store.list(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_agents() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT),
        )
        .await;

        let err = h
            .orchestrator
            .run_workflow(PipelineRequest::new("", "tech"))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::InvalidRequest(_)));
        assert_eq!(h.agent1.draft_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_deadline_aborts_in_flight_stage() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT)
                .improve_delay(Duration::from_secs(30)),
        )
        .await;

        let deadline = Instant::now() + Duration::from_millis(100);
        let err = h
            .orchestrator
            .run_workflow_with_deadline(scenario_request(), Some(deadline))
            .await
            .unwrap_err();

        match err {
            WorkflowError::Agent(e) => {
                assert_eq!(e.stage, Stage::Agent2Improve);
                assert_eq!(e.kind, AgentErrorKind::Timeout);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(h.agent2.image_calls.load(Ordering::SeqCst), 0);
        assert!(h.store.list(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resubmission_creates_distinct_results() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT),
        )
        .await;

        let first = h.orchestrator.run_workflow(scenario_request()).await.unwrap();
        let second = h.orchestrator.run_workflow(scenario_request()).await.unwrap();

        assert_ne!(first.timestamp, second.timestamp);
        assert_eq!(h.agent1.draft_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_verify_healthy_first_probe_does_not_sleep() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT),
        )
        .await;

        let started = std::time::Instant::now();
        let attempts = h
            .orchestrator
            .verify_agents_healthy(3, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(attempts, 1);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(h.agent1.probes.load(Ordering::SeqCst), 1);
        assert_eq!(h.agent2.probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_verify_gives_up_after_exact_attempts() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT).unhealthy_for(u32::MAX),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT).unhealthy_for(u32::MAX),
        )
        .await;

        let err = h
            .orchestrator
            .verify_agents_healthy(3, Duration::ZERO)
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::AgentsNotReady { attempts: 3 }));
        assert_eq!(h.agent1.probes.load(Ordering::SeqCst), 3);
        assert_eq!(h.agent2.probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_verify_requires_both_agents() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT).unhealthy_for(2),
        )
        .await;

        let attempts = h
            .orchestrator
            .verify_agents_healthy(5, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(attempts, 3);
        assert_eq!(h.agent1.probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_probe_agents_reports_each_agent() {
        let h = harness(
            FakeDraftAgent::replying(DRAFT).unhealthy_for(1),
            FakeRefineAgent::replying(FINAL_POST, IMAGE_PROMPT),
        )
        .await;

        let health = h.orchestrator.probe_agents().await;
        assert!(!health.agent1);
        assert!(health.agent2);
        assert!(!health.ready);
    }
}
