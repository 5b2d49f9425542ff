//! A minimal ReAct agent loop
//!
//! The [`Agent`] formats a prompt describing its tools, asks a
//! [`LanguageModel`] to continue it, parses the completion into a tool call
//! or a final answer, runs the tool, appends the observation and repeats.
//!
//! ```ignore
//! use std::sync::Arc;
//! use react_agent::{Agent, FnTool, OpenAiCompletionModel};
//!
//! let llm = Arc::new(OpenAiCompletionModel::from_env()?);
//! let search = Arc::new(FnTool::new("Search", "Searches the web", |q| search(q)));
//! let agent = Agent::new(llm, search)?;
//!
//! let outcome = agent.run("What is the capital of France?").await?;
//! println!("{:?}", outcome.response());
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod tools;

pub use agent::{Agent, AgentResponse, ParsedAction, PromptTemplate, RunOutcome};
pub use config::{AgentConfig, UnparsedPolicy};
pub use error::{AgentError, AgentResult};
pub use llm::{FnModel, LanguageModel, OpenAiCompletionModel};
pub use tools::{FnTool, Tool, ToolRegistry, ToolSet};
