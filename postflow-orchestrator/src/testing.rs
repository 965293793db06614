//! In-process stand-ins for the agents, shared by the unit tests

use async_trait::async_trait;
use postflow_client::agent::{AgentError, AgentErrorKind, AgentResult, DraftAgent, RefineAgent};
use postflow_core::domain::workflow::Stage;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

type Reply = Result<String, AgentErrorKind>;

fn reply(stage: Stage, reply: &Reply) -> AgentResult<String> {
    reply
        .clone()
        .map_err(|kind| AgentError::new(stage, kind, "scripted failure"))
}

/// Consumes one unhealthy probe; true while any remain
fn take_unhealthy(remaining: &AtomicU32) -> bool {
    remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

pub struct FakeDraftAgent {
    draft: Reply,
    unhealthy: AtomicU32,
    pub probes: AtomicUsize,
    pub draft_calls: AtomicUsize,
    pub seen: Mutex<Vec<(String, String, String)>>,
}

impl FakeDraftAgent {
    pub fn replying(draft: &str) -> Self {
        Self::with_reply(Ok(draft.to_string()))
    }

    pub fn failing(kind: AgentErrorKind) -> Self {
        Self::with_reply(Err(kind))
    }

    fn with_reply(draft: Reply) -> Self {
        Self {
            draft,
            unhealthy: AtomicU32::new(0),
            probes: AtomicUsize::new(0),
            draft_calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Fails the first `probes` health checks
    pub fn unhealthy_for(self, probes: u32) -> Self {
        self.unhealthy.store(probes, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl DraftAgent for FakeDraftAgent {
    async fn health(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        !take_unhealthy(&self.unhealthy)
    }

    async fn generate_draft(&self, topic: &str, style: &str, tone: &str) -> AgentResult<String> {
        self.draft_calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((topic.to_string(), style.to_string(), tone.to_string()));
        reply(Stage::Agent1, &self.draft)
    }
}

pub struct FakeRefineAgent {
    improved: Reply,
    image: Reply,
    improve_delay: Option<Duration>,
    unhealthy: AtomicU32,
    pub probes: AtomicUsize,
    pub improve_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
    pub improve_inputs: Mutex<Vec<(String, String)>>,
    pub image_inputs: Mutex<Vec<String>>,
}

impl FakeRefineAgent {
    pub fn replying(improved: &str, image: &str) -> Self {
        Self {
            improved: Ok(improved.to_string()),
            image: Ok(image.to_string()),
            improve_delay: None,
            unhealthy: AtomicU32::new(0),
            probes: AtomicUsize::new(0),
            improve_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            improve_inputs: Mutex::new(Vec::new()),
            image_inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn improve_failing(mut self, kind: AgentErrorKind) -> Self {
        self.improved = Err(kind);
        self
    }

    pub fn image_failing(mut self, kind: AgentErrorKind) -> Self {
        self.image = Err(kind);
        self
    }

    pub fn improve_delay(mut self, delay: Duration) -> Self {
        self.improve_delay = Some(delay);
        self
    }

    pub fn unhealthy_for(self, probes: u32) -> Self {
        self.unhealthy.store(probes, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl RefineAgent for FakeRefineAgent {
    async fn health(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        !take_unhealthy(&self.unhealthy)
    }

    async fn improve(&self, draft_text: &str, target_audience: &str) -> AgentResult<String> {
        self.improve_calls.fetch_add(1, Ordering::SeqCst);
        self.improve_inputs
            .lock()
            .unwrap()
            .push((draft_text.to_string(), target_audience.to_string()));
        if let Some(delay) = self.improve_delay {
            tokio::time::sleep(delay).await;
        }
        reply(Stage::Agent2Improve, &self.improved)
    }

    async fn generate_image_prompt(&self, post_text: &str) -> AgentResult<String> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.image_inputs.lock().unwrap().push(post_text.to_string());
        reply(Stage::Agent2Image, &self.image)
    }
}
