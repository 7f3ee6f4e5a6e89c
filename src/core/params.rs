//! User-supplied report parameters

use crate::agent::{ClientConfig, Credential};
use crate::core::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Models the completion endpoint is known to serve
pub const SUPPORTED_MODELS: &[&str] = &[
    "llama3-70b-8192",
    "llama3-8b-8192",
    "llama-3.3-70b-versatile",
    "llama-3.1-8b-instant",
    "mixtral-8x7b-32768",
    "gemma2-9b-it",
];

/// Model used when the user does not pick one
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Check a model identifier against the allow-list
pub fn is_supported_model(model: &str) -> bool {
    SUPPORTED_MODELS.contains(&model)
}

/// Writing style of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Technical,
    Creative,
    Concise,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Technical, Tone::Creative, Tone::Concise];

    /// Label used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Technical => "Technical",
            Tone::Creative => "Creative",
            Tone::Concise => "Concise",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownTone(s.to_string()))
    }
}

/// Target word count of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetLength {
    Words300,
    #[default]
    Words500,
    Words800,
    Words1000,
}

impl TargetLength {
    pub const ALL: [TargetLength; 4] = [
        TargetLength::Words300,
        TargetLength::Words500,
        TargetLength::Words800,
        TargetLength::Words1000,
    ];

    pub fn words(&self) -> u32 {
        match self {
            TargetLength::Words300 => 300,
            TargetLength::Words500 => 500,
            TargetLength::Words800 => 800,
            TargetLength::Words1000 => 1000,
        }
    }
}

impl fmt::Display for TargetLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words())
    }
}

impl FromStr for TargetLength {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: u32 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::UnknownLength(s.to_string()))?;
        TargetLength::ALL
            .into_iter()
            .find(|length| length.words() == words)
            .ok_or_else(|| ValidationError::UnknownLength(s.to_string()))
    }
}

/// Everything the user provides for one report
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub topic: String,
    pub tone: Tone,
    pub length: TargetLength,
    pub model: String,
    pub credential: Credential,
}

impl ReportParams {
    pub fn new(topic: impl Into<String>, credential: impl Into<Credential>) -> Self {
        Self {
            topic: topic.into(),
            tone: Tone::default(),
            length: TargetLength::default(),
            model: DEFAULT_MODEL.to_string(),
            credential: credential.into(),
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_length(mut self, length: TargetLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The topic with surrounding whitespace removed
    pub fn topic(&self) -> &str {
        self.topic.trim()
    }

    /// Pre-flight checks; the credential is checked before the topic
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.credential.is_blank() {
            return Err(ValidationError::MissingCredential);
        }
        if self.topic().is_empty() {
            return Err(ValidationError::MissingTopic);
        }
        if !is_supported_model(&self.model) {
            return Err(ValidationError::UnsupportedModel(self.model.clone()));
        }
        Ok(())
    }

    /// Variables available to agent and task templates
    pub fn template_variables(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), self.topic().to_string());
        vars.insert("tone".to_string(), self.tone.label().to_string());
        vars.insert("length".to_string(), self.length.words().to_string());
        vars
    }

    /// Client configuration for this report, with default sampling settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.model.clone(), self.credential.clone())
    }
}
