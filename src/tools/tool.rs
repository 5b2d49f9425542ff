//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface.

use anyhow::Result;
use async_trait::async_trait;

/// Trait for tools that the agent can use
///
/// A tool is a named capability: the model picks it by `name`, reads its
/// `description` in the prompt, and passes it a plain-text input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Get a description of this tool
    fn description(&self) -> &str;

    /// Execute the tool with the given input
    ///
    /// Errors are reported back to the model as an observation, so they
    /// never end the run.
    async fn invoke(&self, input: &str) -> Result<String>;
}

type ToolFn = dyn Fn(&str) -> Result<String> + Send + Sync;

/// A tool backed by a plain closure
pub struct FnTool {
    name: String,
    description: String,
    func: Box<ToolFn>,
}

impl FnTool {
    /// Create a tool from a name, a description and a closure
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            func: Box::new(func),
        }
    }
}

impl std::fmt::Debug for FnTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        (self.func)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_tool_invoke() {
        let tool = FnTool::new("Upper", "Uppercases the input", |input| {
            Ok(input.to_uppercase())
        });

        assert_eq!(tool.name(), "Upper");
        assert_eq!(tool.description(), "Uppercases the input");
        assert_eq!(tool.invoke("paris").await.unwrap(), "PARIS");
    }

    #[tokio::test]
    async fn test_fn_tool_error() {
        let tool = FnTool::new("Broken", "Always fails", |_| anyhow::bail!("boom"));
        let err = tool.invoke("x").await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
