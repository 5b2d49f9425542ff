//! Language model capability
//!
//! The agent only needs one thing from a model: given the full transcript,
//! return the next completion as text.

use anyhow::Result;
use async_trait::async_trait;

/// A text-in, text-out language model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete the given prompt
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Human-readable name of the backing model
    fn model(&self) -> String {
        "unknown".to_string()
    }
}

type ModelFn = dyn Fn(&str) -> Result<String> + Send + Sync;

/// A model backed by a plain closure
///
/// Useful for scripted models in tests and for wrapping synchronous
/// inference calls.
pub struct FnModel {
    func: Box<ModelFn>,
}

impl FnModel {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }
}

#[async_trait]
impl LanguageModel for FnModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        (self.func)(prompt)
    }

    fn model(&self) -> String {
        "fn".to_string()
    }
}
