//! Chat-completion client for the recommendation pipeline.
//!
//! One configurable OpenAI-compatible endpoint, bearer auth, a single attempt
//! per request with a bounded timeout, no retries. The trait seam exists so
//! the pipeline can run against [`FakeLlmClient`] in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Client configuration, passed in explicitly - the client never reads the
/// environment itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat-completion endpoint or a bare base URL (see [`normalize_endpoint`]).
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// Kept low to bias the model toward deterministic structured output.
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            timeout_secs: 30,
        }
    }
}

/// LLM call errors. None of these are retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("authentication rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    #[error("upstream error (HTTP {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    #[error("no response from model")]
    NoChoices,
}

/// Resolve a configured base URL to the canonical chat-completion URL.
///
/// URLs that already contain the chat-completion path are used as-is; bare
/// base URLs get `v1/chat/completions` appended, with or without a trailing
/// slash on the base.
pub fn normalize_endpoint(base: &str) -> String {
    if base.contains("/chat/completions") {
        base.to_string()
    } else if base.ends_with('/') {
        format!("{base}v1/chat/completions")
    } else {
        format!("{base}/v1/chat/completions")
    }
}

/// Seam between the pipeline and the model backend.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one system + user message pair, return the raw reply text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Real client over HTTP.
pub struct HttpLlmClient {
    config: LlmConfig,
    url: String,
    client: reqwest::Client,
}

impl HttpLlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to build HTTP client: {e}")))?;
        let url = normalize_endpoint(&config.endpoint);

        Ok(Self { config, url, client })
    }

    /// The resolved chat-completion URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("LLM request to {} (model: {})", self.url, self.config.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Auth {
                    status: status.as_u16(),
                    body,
                },
                _ => LlmError::Upstream {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        let choice = parsed.choices.into_iter().next().ok_or(LlmError::NoChoices)?;
        Ok(choice.message.content)
    }
}

/// Fake client for tests: returns queued responses and counts calls.
pub struct FakeLlmClient {
    responses: Mutex<Vec<Result<String, LlmError>>>,
    call_count: Mutex<usize>,
    last_prompt: Mutex<Option<String>>,
}

impl FakeLlmClient {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// A client that always replies with the given text.
    pub fn always(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    /// A client that always fails with the given error.
    pub fn always_error(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The user prompt of the most recent call, if any.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for FakeLlmClient {
    async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_prompt.lock().unwrap() = Some(user_prompt.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(LlmError::NoChoices);
        }
        if responses.len() == 1 {
            // Keep returning the same response
            responses[0].clone()
        } else {
            responses.remove(0)
        }
    }
}
