//! OpenAI API client
//!
//! A direct HTTP client for the OpenAI Chat Completions API. The whole ReAct
//! transcript is sent as a single user message and the text of the first
//! choice is returned.
//!
//! # Authentication
//!
//! Uses an OpenAI API key (set via `OPENAI_API_KEY` environment variable or passed directly).
//!
//! ```ignore
//! // From environment variable
//! let llm = OpenAiCompletionModel::from_env()?;
//!
//! // With explicit API key
//! let llm = OpenAiCompletionModel::new("sk-...").with_model("gpt-4o-mini");
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use super::model::LanguageModel;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Stops generation before the model writes its own observation
pub const DEFAULT_STOP: &str = "\nObservation:";

// ============================================================================
// OpenAI-specific request/response types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    model: String,
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

// ============================================================================
// OpenAiCompletionModel
// ============================================================================

/// OpenAI-backed language model
pub struct OpenAiCompletionModel {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    api_base: String,
    stop: Vec<String>,
}

impl OpenAiCompletionModel {
    /// Create a new OpenAI model from environment variables
    ///
    /// Reads from:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_MODEL` (required)
    /// - `OPENAI_BASE_URL` (optional, defaults to OpenAI API)
    /// - `OPENAI_MAX_TOKENS` (optional, defaults to 1024)
    pub fn from_env() -> Result<Self> {
        tracing::info!("Creating OpenAI model from environment");

        let api_key = env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable not set")?;

        let model = env::var("OPENAI_MODEL")
            .context("OPENAI_MODEL environment variable not set")?;

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1024);

        tracing::info!("Using model: {}", model);
        tracing::info!("Max tokens: {}", max_tokens);

        let mut llm = Self::new(api_key)
            .with_model(model)
            .with_max_tokens(max_tokens);

        if let Ok(url) = env::var("OPENAI_BASE_URL") {
            tracing::info!("Using custom base URL: {}", url);
            llm = llm.with_base_url(url);
        }

        Ok(llm)
    }

    /// Create a new OpenAI model with a specific API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: String::new(),
            max_tokens: 1024,
            api_base: DEFAULT_API_BASE.to_string(),
            stop: vec![DEFAULT_STOP.to_string()],
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the max tokens for responses
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Point at an OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the stop sequences (empty disables them)
    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = stop;
        self
    }

    fn build_request(&self, prompt: &str) -> OpenAiRequest {
        // Reasoning models (o-series, gpt-5.x) use max_completion_tokens instead of max_tokens
        let is_reasoning_model = self.model.starts_with("o1-")
            || self.model.starts_with("o3-")
            || self.model.starts_with("gpt-5");

        let (max_tokens, max_completion_tokens) = if is_reasoning_model {
            (None, Some(self.max_tokens))
        } else {
            (Some(self.max_tokens), None)
        };

        // Reasoning models reject both temperature and stop
        let (temperature, stop) = if is_reasoning_model {
            (None, Vec::new())
        } else {
            (Some(0.0), self.stop.clone())
        };

        OpenAiRequest {
            model: self.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens,
            max_completion_tokens,
            temperature,
            stop,
        }
    }

    fn extract_text(response: OpenAiResponse) -> Result<String> {
        if let Some(ref usage) = response.usage {
            tracing::debug!(
                "[OpenAI] {} usage: {} prompt / {} completion tokens",
                response.model,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .context("No choices in OpenAI response")?;

        if choice.finish_reason.as_deref() == Some("length") {
            tracing::warn!("[OpenAI] Completion truncated at max tokens");
        }

        Ok(choice.message.content.unwrap_or_default())
    }

    async fn send_request(&self, request: &OpenAiRequest) -> Result<OpenAiResponse> {
        let url = format!("{}/chat/completions", self.api_base);

        let request_json =
            serde_json::to_string(request).context("Failed to serialize OpenAI request")?;
        tracing::debug!("[OpenAI] Request JSON: {}", request_json);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .body(request_json)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read OpenAI response body")?;

        tracing::debug!("[OpenAI] Response status: {}", status);
        tracing::debug!("[OpenAI] Response body: {}", response_text);

        if !status.is_success() {
            tracing::error!("[OpenAI] API error: {} - {}", status, response_text);
            anyhow::bail!("OpenAI API error ({}): {}", status, response_text);
        }

        serde_json::from_str(&response_text).context("Failed to parse OpenAI API response")
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompletionModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        tracing::info!("[OpenAI] Sending completion request");
        let request = self.build_request(prompt);
        let response = self.send_request(&request).await?;
        Self::extract_text(response)
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let llm = OpenAiCompletionModel::new("sk-test").with_model("gpt-4o-mini");
        let value = serde_json::to_value(llm.build_request("Question: 2+2")).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Question: 2+2");
        assert_eq!(value["max_tokens"], 1024);
        assert_eq!(value["stop"], json!([DEFAULT_STOP]));
        assert!(value.get("max_completion_tokens").is_none());
    }

    #[test]
    fn test_reasoning_model_request() {
        let llm = OpenAiCompletionModel::new("sk-test")
            .with_model("gpt-5-mini")
            .with_max_tokens(500);
        let value = serde_json::to_value(llm.build_request("hi")).unwrap();

        assert_eq!(value["max_completion_tokens"], 500);
        assert!(value.get("max_tokens").is_none());
        assert!(value.get("temperature").is_none());
        assert!(value.get("stop").is_none());
    }

    #[test]
    fn test_extract_text() {
        let body = json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 0,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Thought: done\nFinal Answer: 4"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });
        let response: OpenAiResponse = serde_json::from_value(body).unwrap();
        let text = OpenAiCompletionModel::extract_text(response).unwrap();
        assert_eq!(text, "Thought: done\nFinal Answer: 4");
    }

    #[test]
    fn test_extract_text_no_choices() {
        let response: OpenAiResponse =
            serde_json::from_value(json!({"model": "m", "choices": []})).unwrap();
        assert!(OpenAiCompletionModel::extract_text(response).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let llm = OpenAiCompletionModel::new("k").with_base_url("http://localhost:8080/v1/");
        assert_eq!(llm.api_base, "http://localhost:8080/v1");
    }
}
