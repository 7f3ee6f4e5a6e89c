//! Completion response and error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for completion calls
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LlmError {
    /// The endpoint rejected the credential
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The endpoint does not know the requested model
    #[error("Model '{model}' not found: {message}")]
    ModelNotFound { model: String, message: String },

    /// The endpoint is throttling requests
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Network failure, timeout, unexpected status or malformed body
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request was rejected locally before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl LlmError {
    /// Whether the user can fix this by changing the credential or model
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            LlmError::Authentication(_) | LlmError::ModelNotFound { .. }
        )
    }
}

/// Text returned by the model for a single prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// The completion text
    pub content: String,

    /// Model that actually served the request, when reported
    pub model: Option<String>,

    /// Token usage information (if available)
    pub usage: Option<TokenUsage>,
}

impl Completion {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: None,
            usage: None,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_creation() {
        let completion = Completion::new("Hello, world!");
        assert_eq!(completion.content, "Hello, world!");
        assert!(completion.model.is_none());
        assert!(completion.usage.is_none());
    }

    #[test]
    fn test_user_recoverable_errors() {
        assert!(LlmError::Authentication("bad key".into()).is_user_recoverable());
        assert!(LlmError::ModelNotFound {
            model: "gpt-9".into(),
            message: "unknown".into()
        }
        .is_user_recoverable());
        assert!(!LlmError::RateLimit("slow down".into()).is_user_recoverable());
        assert!(!LlmError::Transport("connection reset".into()).is_user_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = LlmError::ModelNotFound {
            model: "llama9".into(),
            message: "does not exist".into(),
        };
        assert_eq!(err.to_string(), "Model 'llama9' not found: does not exist");
    }
}
