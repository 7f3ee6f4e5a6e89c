//! Language model client for executing prompts

pub mod client;
pub mod groq;
pub mod response;

use async_trait::async_trait;
use std::sync::Arc;

pub use client::{ClientConfig, Credential};
pub use groq::GroqClient;
pub use response::{Completion, LlmError, TokenUsage};

/// Trait for completion clients - allows for different implementations
///
/// One call to `generate` is one request to the remote endpoint. Implementations
/// must not retry internally.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for `prompt` using the model and credential in `config`
    async fn generate(&self, prompt: &str, config: &ClientConfig) -> Result<Completion, LlmError>;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn generate(&self, prompt: &str, config: &ClientConfig) -> Result<Completion, LlmError> {
        (**self).generate(prompt, config).await
    }
}
