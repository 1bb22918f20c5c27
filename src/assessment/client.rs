//! Assessment clients.
//!
//! The engine never depends on assessment text; it only hands a finished
//! [`ConversionResult`] to an [`Assessor`] and reports whatever comes back.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AssessmentConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::ConversionResult;

use super::prompt::{SYSTEM_PROMPT, build_prompt};

/// Produces a free-text assessment of a conversion result.
#[async_trait]
pub trait Assessor: Send + Sync {
    /// Returns assessment text, or `AssessmentFailed`.
    async fn assess(&self, result: &ConversionResult) -> EngineResult<String>;
}

/// One message of a chat completions conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

/// Request body for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// Response body from a chat completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Generated alternatives; only the first is used.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// A single generated alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatChoiceMessage,
}

/// The message inside a [`ChatChoice`]. Content may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    /// Generated text.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Returns the text of the first choice, if it has any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|content| !content.is_empty())
    }
}

/// Assessor backed by an OpenAI-compatible chat completions API.
#[derive(Clone)]
pub struct ChatCompletionAssessor {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    api_key: String,
}

impl fmt::Debug for ChatCompletionAssessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionAssessor")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionAssessor {
    /// Creates an assessor with an explicit API key.
    pub fn new(config: &AssessmentConfig, api_key: impl Into<String>) -> EngineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::InvalidConfig {
                field: "assessment".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            api_key: api_key.into(),
        })
    }

    /// Creates an assessor reading the API key from the configured
    /// environment variable.
    pub fn from_env(config: &AssessmentConfig) -> EngineResult<Self> {
        let api_key =
            std::env::var(&config.api_key_env).map_err(|_| EngineError::InvalidConfig {
                field: "assessment.api_key_env".to_string(),
                message: format!("environment variable {} is not set", config.api_key_env),
            })?;
        Self::new(config, api_key)
    }

    /// Builds the request body for a conversion result.
    pub fn build_request(&self, result: &ConversionResult) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(result),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl Assessor for ChatCompletionAssessor {
    async fn assess(&self, result: &ConversionResult) -> EngineResult<String> {
        let request = self.build_request(result);
        debug!(endpoint = %self.endpoint, model = %self.model, "Requesting salary assessment");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::AssessmentFailed {
                message: format!("request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Assessment endpoint returned an error");
            return Err(EngineError::AssessmentFailed {
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let body: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| EngineError::AssessmentFailed {
                    message: format!("invalid response body: {}", e),
                })?;

        body.first_content()
            .map(str::to_string)
            .ok_or_else(|| EngineError::AssessmentFailed {
                message: "response contained no assessment text".to_string(),
            })
    }
}

/// Assessor used when assessments are switched off. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAssessor;

#[async_trait]
impl Assessor for DisabledAssessor {
    async fn assess(&self, _result: &ConversionResult) -> EngineResult<String> {
        Err(EngineError::AssessmentFailed {
            message: "assessments are disabled".to_string(),
        })
    }
}
