//! Error types for crew construction and execution

use crate::agent::LlmError;
use crate::core::state::ExecutionStatus;
use thiserror::Error;

/// Input problems detected before any model call is made
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("A research topic is required")]
    MissingTopic,

    #[error("An API key is required")]
    MissingCredential,

    #[error("Unsupported model '{0}'")]
    UnsupportedModel(String),

    #[error("Temperature {0} is outside the range 0.0..=1.0")]
    TemperatureOutOfRange(f32),

    #[error("Agent role must not be empty")]
    EmptyRole,

    #[error("Task {0} has an empty description")]
    EmptyDescription(usize),

    #[error("Task {task_index} references an agent that is not part of this crew")]
    ForeignAgent { task_index: usize },

    #[error("A crew needs at least one task")]
    NoTasks,

    #[error("Unknown tone '{0}'")]
    UnknownTone(String),

    #[error("Unsupported target length '{0}'")]
    UnknownLength(String),
}

/// Terminal failure of a crew run
#[derive(Debug, Error)]
pub enum CrewError {
    /// Missing or invalid input; no model call was made
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// A task's completion call failed; later tasks were not run
    #[error("Task {} ({agent_role}) failed: {source}", .task_index + 1)]
    Execution {
        task_index: usize,
        agent_role: String,
        #[source]
        source: LlmError,
    },

    /// The engine was already used for a run
    #[error("Run already started (status: {0})")]
    AlreadyStarted(ExecutionStatus),
}

impl CrewError {
    /// Whether the run was stopped before any model call
    pub fn is_missing_input(&self) -> bool {
        matches!(self, CrewError::Validation(_))
    }

    /// Index of the task whose call failed
    pub fn failed_task(&self) -> Option<usize> {
        match self {
            CrewError::Execution { task_index, .. } => Some(*task_index),
            _ => None,
        }
    }

    /// The adapter error behind an execution failure
    pub fn llm_error(&self) -> Option<&LlmError> {
        match self {
            CrewError::Execution { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Message suitable for showing to the user as-is
    pub fn user_message(&self) -> String {
        match self {
            CrewError::Validation(ValidationError::MissingTopic) => {
                "Please enter a research topic.".to_string()
            }
            CrewError::Validation(ValidationError::MissingCredential) => {
                "Please provide a Groq API key (--api-key or GROQ_API_KEY).".to_string()
            }
            CrewError::Validation(ValidationError::UnsupportedModel(model)) => format!(
                "'{}' is not a supported model. Run `crewx models` to see the options.",
                model
            ),
            CrewError::Validation(other) => other.to_string(),
            CrewError::Execution {
                agent_role, source, ..
            } => match source {
                LlmError::Authentication(_) => {
                    "The API key was rejected. Check your credential and try again.".to_string()
                }
                LlmError::ModelNotFound { model, .. } => format!(
                    "Model '{}' is not available. Pick another model (see `crewx models`).",
                    model
                ),
                LlmError::RateLimit(_) => {
                    "The provider is throttling requests. Wait a moment and run again.".to_string()
                }
                LlmError::Transport(message) => format!(
                    "{} could not reach the model provider: {}",
                    agent_role, message
                ),
                LlmError::InvalidRequest(message) => {
                    format!("{} produced an invalid request: {}", agent_role, message)
                }
            },
            CrewError::AlreadyStarted(_) => {
                "This run has already been started; start a new one.".to_string()
            }
        }
    }
}
