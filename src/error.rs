//! Error types for the agent
//!
//! Only failures that end a run or reject a construction live here.
//! Tool failures and malformed model output are folded into the
//! transcript instead, so the model can correct itself.

use thiserror::Error;

/// Errors raised by agent construction, configuration or a run
#[derive(Debug, Error)]
pub enum AgentError {
    /// A configuration value failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two tools were registered under the same name
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// The language model call failed
    #[error("Language model error: {0}")]
    Model(#[source] anyhow::Error),

    /// The model output had no recognizable action and the agent is set to abort
    #[error("Model output could not be parsed: {raw}")]
    Unparsable { raw: String },
}

/// Result type alias for agent operations
pub type AgentResult<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::DuplicateTool("Search".into());
        assert_eq!(err.to_string(), "Duplicate tool name: Search");

        let err = AgentError::InvalidConfig("verbose must be bool, got \"yes\"".into());
        assert!(err.to_string().contains("verbose must be bool"));
    }

    #[test]
    fn test_model_error_keeps_source() {
        let err = AgentError::Model(anyhow::anyhow!("connection refused"));
        assert!(err.to_string().contains("connection refused"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
