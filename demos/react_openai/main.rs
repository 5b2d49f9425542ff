//! ReAct Agent Example - OpenAI backend
//!
//! Asks one question against an OpenAI chat model with two toy tools and
//! prints the answer and the full transcript.
//!
//! Reads `OPENAI_API_KEY` / `OPENAI_MODEL` for the model and
//! `REACT_VERBOSE` / `REACT_MAX_ITERATIONS` / `REACT_UNPARSED_POLICY`
//! for the agent.
//!
//! Run with: cargo run --example react_openai -- "How many words are in 'the quick brown fox'?"

use anyhow::Result;
use std::sync::Arc;

use react_agent::{
    cli::Console, logging::init_logging, Agent, AgentConfig, FnTool, OpenAiCompletionModel, Tool,
};

fn create_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(FnTool::new(
            "WordCount",
            "Counts the words in the input text. Input should be the text to count.",
            |input| Ok(input.split_whitespace().count().to_string()),
        )),
        Arc::new(FnTool::new(
            "Reverse",
            "Reverses the characters of the input text. Input should be the text to reverse.",
            |input| Ok(input.chars().rev().collect()),
        )),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AgentConfig::from_env()?;
    init_logging("logs", config.verbose)?;

    let console = Console::new();
    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "What is 'stressed' spelled backwards?".to_string());

    let llm = Arc::new(OpenAiCompletionModel::from_env()?);
    let agent = Agent::with_config(llm, create_tools(), config)?;

    console.print_question(&question);
    match agent.run(&question).await {
        Ok(outcome) => {
            console.print_transcript(outcome.full_text());
            console.print_outcome(&outcome);
        }
        Err(e) => {
            tracing::error!("Agent run failed: {:?}", e);
            console.print_error(&e.to_string());
        }
    }

    Ok(())
}
