//! Completion client configuration

use crate::core::ValidationError;
use std::fmt;

/// Default OpenAI-compatible endpoint of the Groq API
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Sampling temperature used when none is given
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Opaque API secret. Never printed, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for the `Authorization` header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}

/// Configuration for one run against the completion endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hosted model identifier, e.g. `llama3-70b-8192`
    pub model: String,

    /// Sampling randomness, 0.0..=1.0
    pub temperature: f32,

    /// API secret sent as a bearer token
    pub credential: Credential,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Timeout for a single request in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(model: impl Into<String>, credential: impl Into<Credential>) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            credential: credential.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Pre-flight checks that need no network access
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.credential.is_blank() {
            return Err(ValidationError::MissingCredential);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::UnsupportedModel(self.model.clone()));
        }
        if !self.temperature.is_finite() || !(0.0..=1.0).contains(&self.temperature) {
            return Err(ValidationError::TemperatureOutOfRange(self.temperature));
        }
        Ok(())
    }

    /// URL of the chat completions route
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
