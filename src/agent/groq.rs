//! Groq client - calls the OpenAI-compatible chat completions API

use crate::agent::{ClientConfig, Completion, LlmClient, LlmError, TokenUsage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Provider error codes that mean the model identifier is unusable
const MODEL_ERROR_CODES: &[&str] = &["model_not_found", "model_decommissioned"];

/// Client for the Groq chat completions endpoint
///
/// Holds only the HTTP connection pool. Model, credential, base URL and
/// timeout come from the [`ClientConfig`] passed to each call.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: Client,
}

impl GroqClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns `LlmError::Transport` if the HTTP client cannot be initialized
    pub fn new() -> Result<Self, LlmError> {
        let http = Client::builder()
            .user_agent(concat!("crewx/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LlmError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// Map a non-success response to an error kind
    fn classify_failure(status: StatusCode, body: &str, model: &str) -> LlmError {
        let detail = serde_json::from_str::<ApiErrorBody>(body).ok().map(|b| b.error);
        let message = detail
            .as_ref()
            .map(|d| d.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());
        let code = detail.as_ref().and_then(|d| d.code.as_deref());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication(message),
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimit(message),
            StatusCode::NOT_FOUND => LlmError::ModelNotFound {
                model: model.to_string(),
                message,
            },
            _ if code.is_some_and(|c| MODEL_ERROR_CODES.contains(&c)) => LlmError::ModelNotFound {
                model: model.to_string(),
                message,
            },
            _ => LlmError::Transport(format!("HTTP {}: {}", status, message)),
        }
    }
}

/// Stand-in error message when the body of a failed response cannot be read
fn unreadable_body_message(err: &dyn std::fmt::Display) -> String {
    format!("error body unreadable: {}", err)
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn generate(&self, prompt: &str, config: &ClientConfig) -> Result<Completion, LlmError> {
        if prompt.trim().is_empty() {
            return Err(LlmError::InvalidRequest("prompt is empty".to_string()));
        }

        let url = config.completions_url();
        debug!(
            "Requesting completion from {} (model {}, prompt length {})",
            url,
            config.model,
            prompt.len()
        );

        let body = ChatRequest {
            model: &config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: config.temperature,
            stream: false,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(config.credential.expose())
            .timeout(Duration::from_secs(config.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Transport(format!(
                        "Timeout after {} seconds",
                        config.timeout_secs
                    ))
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to read error body for status {}: {}", status, e);
                    unreadable_body_message(&e)
                }
            };
            warn!("Completion request failed with status {}", status);
            return Err(Self::classify_failure(status, &text, &config.model));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("Malformed response: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Transport("Response contained no choices".to_string()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| LlmError::Transport("Response message has no content".to_string()))?;

        debug!("Completion returned {} bytes", content.len());

        Ok(Completion {
            content,
            model: parsed.model,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

// OpenAI-compatible wire types
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}
