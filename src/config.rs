//! Agent configuration
//!
//! `AgentConfig` is an immutable-by-default value object built with
//! `with_*` methods or read from the environment.

use std::env;
use std::str::FromStr;

use crate::agent::PromptTemplate;
use crate::error::{AgentError, AgentResult};

/// Maximum number of model calls in a single run
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

/// What to do when a completion has neither `Action:` nor `Final Answer:`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnparsedPolicy {
    /// Show the model its output plus a format warning and call it again
    #[default]
    Retry,
    /// End the run with `AgentError::Unparsable`
    Abort,
}

impl FromStr for UnparsedPolicy {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retry" => Ok(UnparsedPolicy::Retry),
            "abort" => Ok(UnparsedPolicy::Abort),
            other => Err(AgentError::InvalidConfig(format!(
                "unparsed policy must be 'retry' or 'abort', got {:?}",
                other
            ))),
        }
    }
}

/// Configuration for an [`Agent`](crate::agent::Agent)
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Log every step of the loop at info level
    pub verbose: bool,
    /// Upper bound on model calls per run
    pub max_iterations: usize,
    pub unparsed_policy: UnparsedPolicy,
    pub template: PromptTemplate,
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from environment variables
    ///
    /// Reads from:
    /// - `REACT_VERBOSE` (optional, `true` or `false`)
    /// - `REACT_MAX_ITERATIONS` (optional, positive integer)
    /// - `REACT_UNPARSED_POLICY` (optional, `retry` or `abort`)
    pub fn from_env() -> AgentResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> AgentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("REACT_VERBOSE") {
            config.verbose = parse_verbose(&raw)?;
        }

        if let Some(raw) = lookup("REACT_MAX_ITERATIONS") {
            config.max_iterations = raw.trim().parse().map_err(|_| {
                AgentError::InvalidConfig(format!(
                    "max iterations must be a positive integer, got {:?}",
                    raw
                ))
            })?;
        }

        if let Some(raw) = lookup("REACT_UNPARSED_POLICY") {
            config.unparsed_policy = raw.parse()?;
        }

        config.validate()?;
        tracing::debug!("Loaded agent config: {:?}", config);
        Ok(config)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_unparsed_policy(mut self, policy: UnparsedPolicy) -> Self {
        self.unparsed_policy = policy;
        self
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Check invariants the type system does not enforce
    pub fn validate(&self) -> AgentResult<()> {
        if self.max_iterations == 0 {
            return Err(AgentError::InvalidConfig(
                "max iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            unparsed_policy: UnparsedPolicy::default(),
            template: PromptTemplate::default(),
        }
    }
}

/// Parse a verbosity flag; only `true` and `false` are accepted
pub fn parse_verbose(raw: &str) -> AgentResult<bool> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(AgentError::InvalidConfig(format!(
            "verbose must be bool, got {:?}",
            other
        ))),
    }
}
