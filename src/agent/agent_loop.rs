//! ReAct agent loop
//!
//! One run grows a single transcript string:
//! - build the initial prompt from the template and tools
//! - ask the model to continue it
//! - parse the completion, run the requested tool, append the observation
//! - repeat until a final answer or the iteration cap

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::Instrument;
use uuid::Uuid;

use super::parser::{parse_output, ParsedAction};
use super::prompt::PromptTemplate;
use crate::config::{AgentConfig, UnparsedPolicy};
use crate::error::{AgentError, AgentResult};
use crate::llm::LanguageModel;
use crate::tools::{Tool, ToolRegistry, ToolSet};

/// Observation used when a tool returns an empty string
pub const EMPTY_TOOL_OUTPUT: &str = "Tool returned no results";

/// A finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    /// The final answer text
    pub response: String,
    /// The complete transcript, ending with the `Final Answer:` line
    pub full_text: String,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The model produced a final answer
    Answered(AgentResponse),
    /// The iteration cap was hit first
    Exhausted { full_text: String, iterations: usize },
}

impl RunOutcome {
    /// The final answer, if there is one
    pub fn response(&self) -> Option<&str> {
        match self {
            RunOutcome::Answered(r) => Some(&r.response),
            RunOutcome::Exhausted { .. } => None,
        }
    }

    /// The transcript at the end of the run
    pub fn full_text(&self) -> &str {
        match self {
            RunOutcome::Answered(r) => &r.full_text,
            RunOutcome::Exhausted { full_text, .. } => full_text,
        }
    }

    pub fn into_response(self) -> Option<AgentResponse> {
        match self {
            RunOutcome::Answered(r) => Some(r),
            RunOutcome::Exhausted { .. } => None,
        }
    }
}

/// ReAct agent over a text completion model and a set of tools
pub struct Agent {
    llm: Arc<dyn LanguageModel>,
    tool_registry: ToolRegistry,
    config: AgentConfig,
}

impl Agent {
    /// Create an agent with the default configuration
    ///
    /// `tools` is a single tool or a list of tools.
    pub fn new(llm: Arc<dyn LanguageModel>, tools: impl Into<ToolSet>) -> AgentResult<Self> {
        Self::with_config(llm, tools, AgentConfig::default())
    }

    /// Create an agent with an explicit configuration
    pub fn with_config(
        llm: Arc<dyn LanguageModel>,
        tools: impl Into<ToolSet>,
        config: AgentConfig,
    ) -> AgentResult<Self> {
        config.validate()?;
        let tool_registry = tools.into().into_registry()?;

        tracing::info!(
            "Creating Agent (model: {}, tools: {:?})",
            llm.model(),
            tool_registry.tool_names()
        );

        Ok(Self {
            llm,
            tool_registry,
            config,
        })
    }

    pub fn llm(&self) -> &Arc<dyn LanguageModel> {
        &self.llm
    }

    pub fn set_llm(&mut self, llm: Arc<dyn LanguageModel>) {
        self.llm = llm;
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Replace the tools; the old set is kept if the new one is invalid
    pub fn set_tools(&mut self, tools: impl Into<ToolSet>) -> AgentResult<()> {
        self.tool_registry = tools.into().into_registry()?;
        Ok(())
    }

    /// Tool names in registration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.tool_registry.tool_names()
    }

    pub fn tool_dict(&self) -> HashMap<&str, &Arc<dyn Tool>> {
        self.tool_registry.tool_dict()
    }

    pub fn verbose(&self) -> bool {
        self.config.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.config.verbose = verbose;
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Replace the configuration; the old one is kept if the new one is invalid
    pub fn set_config(&mut self, config: AgentConfig) -> AgentResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Format the initial prompt with the configured template
    pub fn create_prompt(&self, question: &str) -> String {
        self.create_prompt_with(question, &self.config.template)
    }

    /// Format the initial prompt with a custom template
    pub fn create_prompt_with(&self, question: &str, template: &PromptTemplate) -> String {
        template.render(question, &self.tool_registry)
    }

    /// Run a tool by name
    ///
    /// Never fails: unknown tools and tool errors come back as text for
    /// the model to read as its next observation.
    pub async fn run_tool(&self, tool_name: &str, tool_input: &str) -> String {
        let Some(tool) = self.tool_registry.get(tool_name) else {
            tracing::warn!("Model requested unknown tool: {}", tool_name);
            return format!("No tool with the name {} found", tool_name);
        };

        tracing::info!("Running tool: {}", tool_name);
        let result = AssertUnwindSafe(tool.invoke(tool_input))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::warn!("Tool {} failed: {:#}", tool_name, e);
                format!("Tool encountered an error: {}", e)
            }
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                tracing::error!("Tool {} panicked: {}", tool_name, msg);
                format!("Tool encountered an error: {}", msg)
            }
        }
    }

    /// Parse a model completion
    pub fn parse_output(&self, output: &str) -> ParsedAction {
        parse_output(output)
    }

    /// Run the agent on a question
    pub async fn run(&self, question: &str) -> AgentResult<RunOutcome> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("react_run", %run_id);
        self.run_loop(question).instrument(span).await
    }

    async fn run_loop(&self, question: &str) -> AgentResult<RunOutcome> {
        tracing::info!("Starting agent run: {}", question);

        let mut prompt = self.create_prompt(question);
        self.log_step("INITIAL PROMPT", &prompt);

        let max_iterations = self.config.max_iterations;
        for iteration in 1..=max_iterations {
            tracing::debug!("Iteration {}/{}", iteration, max_iterations);

            let response = self
                .llm
                .complete(&prompt)
                .await
                .map_err(AgentError::Model)?;
            self.log_step("MODEL RESPONSE", &response);

            let action = parse_output(&response);
            self.log_step("PARSED ACTION", &action.to_string());

            match action {
                ParsedAction::ToolCall {
                    thought,
                    tool,
                    input,
                } => {
                    let mut tool_response = self.run_tool(&tool, &input).await;
                    if tool_response.is_empty() {
                        tool_response = EMPTY_TOOL_OUTPUT.to_string();
                    }

                    prompt.push_str(&format!(
                        "{}\nAction: {}\nAction Input: {}\nObservation: {}\n",
                        thought, tool, input, tool_response
                    ));
                    self.log_step("NEW PROMPT", &prompt);
                }
                ParsedAction::FinalAnswer { thought, answer } => {
                    prompt.push_str(&format!("{}\nFinal Answer: {}", thought, answer));
                    self.log_step("FINAL TEXT", &prompt);
                    tracing::info!("Final answer after {} iteration(s)", iteration);

                    return Ok(RunOutcome::Answered(AgentResponse {
                        response: answer,
                        full_text: prompt,
                    }));
                }
                ParsedAction::Unparsed { raw, warning } => match self.config.unparsed_policy {
                    UnparsedPolicy::Abort => {
                        tracing::error!("No parsable action in model output, aborting run");
                        return Err(AgentError::Unparsable { raw });
                    }
                    UnparsedPolicy::Retry => {
                        tracing::warn!("No parsable action in model output, asking model to reformat");
                        prompt.push_str(&format!("{}\nObservation: {}\n", raw, warning));
                        self.log_step("NEW PROMPT", &prompt);
                    }
                },
            }
        }

        tracing::warn!("Maximum iterations reached ({})", max_iterations);
        Ok(RunOutcome::Exhausted {
            full_text: prompt,
            iterations: max_iterations,
        })
    }

    fn log_step(&self, label: &str, text: &str) {
        if self.config.verbose {
            tracing::info!("{}:\n\n{}\n", label, text);
        } else {
            tracing::debug!("{}:\n\n{}\n", label, text);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("model", &self.llm.model())
            .field("tools", &self.tool_registry)
            .field("config", &self.config)
            .finish()
    }
}
