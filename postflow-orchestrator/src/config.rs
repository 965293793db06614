//! Gateway configuration
//!
//! Defines all configurable parameters of the orchestrator process: agent
//! locations, call and probe timeouts, the startup readiness wait, the
//! result directory and the listen address.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Orchestrator configuration
///
/// Passed explicitly into the clients and the store; nothing reads the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Draft agent base URL (e.g., "http://agent1-local:8001")
    pub agent1_url: String,

    /// Refine/describe agent base URL (e.g., "http://agent2-gemini:8002")
    pub agent2_url: String,

    /// Timeout of every pipeline stage call
    pub agent_timeout: Duration,

    /// Timeout of a single health probe
    pub health_timeout: Duration,

    /// Probe attempts before the agents are declared not ready
    pub health_retries: u32,

    /// Pause between two probe attempts
    pub health_retry_delay: Duration,

    /// Probe the agents before serving
    pub wait_for_agents: bool,

    /// Refuse to start when the agents never became ready
    pub require_agents: bool,

    /// Overall deadline of a single run, if any
    pub workflow_deadline: Option<Duration>,

    /// Directory holding one JSON document per completed run
    pub history_dir: PathBuf,

    /// Number of entries returned by the history listing
    pub history_limit: usize,

    /// Address the gateway listens on
    pub bind_addr: String,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Every variable is optional and falls back to [`Config::default`]:
    /// - AGENT1_URL, AGENT2_URL
    /// - AGENT_TIMEOUT, HEALTH_TIMEOUT, HEALTH_RETRY_DELAY (seconds)
    /// - HEALTH_RETRIES
    /// - WAIT_FOR_AGENTS, REQUIRE_AGENTS (true/false)
    /// - WORKFLOW_DEADLINE (seconds, unset means no deadline)
    /// - HISTORY_DIR, HISTORY_LIMIT
    /// - GATEWAY_BIND_ADDR
    ///
    /// A variable that is set but cannot be parsed is an error; nothing
    /// falls back to defaults in that case.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads from the environment and validates the result
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse_secs = |key: &str| -> anyhow::Result<Option<Duration>> {
            Ok(parse_var::<u64>(key, lookup(key))?.map(Duration::from_secs))
        };

        Ok(Self {
            agent1_url: lookup("AGENT1_URL").unwrap_or(defaults.agent1_url),
            agent2_url: lookup("AGENT2_URL").unwrap_or(defaults.agent2_url),
            agent_timeout: parse_secs("AGENT_TIMEOUT")?.unwrap_or(defaults.agent_timeout),
            health_timeout: parse_secs("HEALTH_TIMEOUT")?.unwrap_or(defaults.health_timeout),
            health_retries: parse_var("HEALTH_RETRIES", lookup("HEALTH_RETRIES"))?
                .unwrap_or(defaults.health_retries),
            health_retry_delay: parse_secs("HEALTH_RETRY_DELAY")?
                .unwrap_or(defaults.health_retry_delay),
            wait_for_agents: parse_var("WAIT_FOR_AGENTS", lookup("WAIT_FOR_AGENTS"))?
                .unwrap_or(defaults.wait_for_agents),
            require_agents: parse_var("REQUIRE_AGENTS", lookup("REQUIRE_AGENTS"))?
                .unwrap_or(defaults.require_agents),
            workflow_deadline: parse_secs("WORKFLOW_DEADLINE")?,
            history_dir: lookup("HISTORY_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_dir),
            history_limit: parse_var("HISTORY_LIMIT", lookup("HISTORY_LIMIT"))?
                .unwrap_or(defaults.history_limit),
            bind_addr: lookup("GATEWAY_BIND_ADDR").unwrap_or(defaults.bind_addr),
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [("agent1_url", &self.agent1_url), ("agent2_url", &self.agent2_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.agent_timeout.is_zero() {
            anyhow::bail!("agent_timeout must be greater than 0");
        }

        if self.health_timeout.is_zero() {
            anyhow::bail!("health_timeout must be greater than 0");
        }

        if self.health_retries == 0 {
            anyhow::bail!("health_retries must be greater than 0");
        }

        if self.workflow_deadline.is_some_and(|d| d.is_zero()) {
            anyhow::bail!("workflow_deadline must be greater than 0 when set");
        }

        if self.history_limit == 0 {
            anyhow::bail!("history_limit must be greater than 0");
        }

        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agent1_url: "http://agent1-local:8001".to_string(),
            agent2_url: "http://agent2-gemini:8002".to_string(),
            agent_timeout: Duration::from_secs(120),
            health_timeout: Duration::from_secs(5),
            health_retries: 30,
            health_retry_delay: Duration::from_secs(2),
            wait_for_agents: true,
            require_agents: false,
            workflow_deadline: None,
            history_dir: PathBuf::from("history"),
            history_limit: 10,
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

fn parse_var<T>(key: &str, raw: Option<String>) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(None),
    }
}
