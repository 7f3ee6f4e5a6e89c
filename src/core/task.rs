//! Task domain model

use serde::Serialize;
use uuid::Uuid;

/// Handle to an agent inside one crew
///
/// Only a [`CrewBuilder`](crate::core::CrewBuilder) hands these out, and a
/// crew refuses handles that were issued by another builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AgentRef {
    #[serde(skip)]
    pub(crate) crew_id: Uuid,
    pub(crate) index: usize,
}

impl AgentRef {
    /// Position of the agent in its crew
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One unit of work, bound to exactly one agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDefinition {
    description: String,
    expected_output: String,
    agent: AgentRef,
}

impl TaskDefinition {
    pub(crate) fn new(
        agent: AgentRef,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
        }
    }

    /// Instructions for this task
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Natural-language contract for the shape of the result. Only used in the prompt.
    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    /// The agent assigned to this task
    pub fn agent(&self) -> AgentRef {
        self.agent
    }
}
