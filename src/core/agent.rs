//! Agent definition - a named role with a goal and persona

use serde::{Deserialize, Serialize};

/// A role that frames how prompts are phrased for one stage
///
/// Immutable once built; tasks refer to it through an [`AgentRef`](crate::core::AgentRef).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    role: String,
    goal: String,
    backstory: String,
    allow_delegation: bool,
}

impl AgentDefinition {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            allow_delegation: false,
        }
    }

    /// Allow this agent to hand work to another agent
    pub fn with_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn allow_delegation(&self) -> bool {
        self.allow_delegation
    }
}
