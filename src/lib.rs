//! crewx - a two-stage research and writing crew powered by hosted language models

pub mod agent;
pub mod cli;
pub mod core;
pub mod execution;
pub mod persistence;

// Re-export commonly used types
pub use agent::{ClientConfig, Completion, Credential, GroqClient, LlmClient, LlmError};
pub use crate::core::{
    AgentDefinition, Crew, CrewError, ExecutionStatus, PipelineResult, ReportParams, TargetLength,
    TaskDefinition, Tone, ValidationError,
};
pub use execution::{ExecutionEngine, ExecutionEvent};
