pub mod agent_loop;
pub mod parser;
pub mod prompt;

pub use agent_loop::{Agent, AgentResponse, RunOutcome, EMPTY_TOOL_OUTPUT};
pub use parser::{parse_output, ParsedAction, UNPARSED_WARNING};
pub use prompt::{PromptTemplate, INSTRUCTIONS, PREFIX, SUFFIX};
