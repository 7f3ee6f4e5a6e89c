//! Crew configuration from YAML

use crate::core::placeholders;
use crate::core::prompt::render_template;
use crate::core::{AgentDefinition, Crew, ReportParams, ValidationError};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Placeholders a crew file may use
pub const TEMPLATE_VARIABLES: &[&str] = &["topic", "tone", "length"];

/// Top-level crew configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewConfig {
    /// Crew name
    pub name: String,

    /// Crew version (optional)
    #[serde(default)]
    pub version: Option<String>,

    /// Agents, referenced by id from tasks
    pub agents: Vec<AgentConfig>,

    /// Tasks, executed in the order listed
    pub tasks: Vec<TaskConfig>,
}

/// Agent configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Unique agent identifier
    pub id: String,

    pub role: String,

    pub goal: String,

    #[serde(default)]
    pub backstory: String,

    #[serde(default)]
    pub allow_delegation: bool,
}

/// Task configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Id of the agent that runs this task
    pub agent: String,

    /// Task instructions (template)
    pub description: String,

    /// Shape of the expected result (template)
    #[serde(default)]
    pub expected_output: String,
}

impl CrewConfig {
    /// Load crew configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse crew configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: CrewConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the crew configuration
    pub fn validate(&self) -> Result<()> {
        // Check that all agent IDs are unique and roles are set
        let mut seen_ids = HashSet::new();
        for agent in &self.agents {
            if !seen_ids.insert(agent.id.as_str()) {
                anyhow::bail!("Duplicate agent ID: {}", agent.id);
            }
            if agent.role.trim().is_empty() {
                anyhow::bail!("Agent '{}' has an empty role", agent.id);
            }
        }

        if self.tasks.is_empty() {
            anyhow::bail!("Crew '{}' has no tasks", self.name);
        }

        for (index, task) in self.tasks.iter().enumerate() {
            if !seen_ids.contains(task.agent.as_str()) {
                anyhow::bail!(
                    "Task {} references non-existent agent '{}'",
                    index + 1,
                    task.agent
                );
            }
            if task.description.trim().is_empty() {
                anyhow::bail!("Task {} has an empty description", index + 1);
            }
        }

        // Every template string may only use the known placeholders
        for template in self.templates() {
            for name in placeholders(template) {
                if !TEMPLATE_VARIABLES.contains(&name.as_str()) {
                    anyhow::bail!(
                        "Unknown placeholder '{{{{ {} }}}}' (available: {})",
                        name,
                        TEMPLATE_VARIABLES.join(", ")
                    );
                }
            }
        }

        Ok(())
    }

    fn templates(&self) -> impl Iterator<Item = &str> {
        let agent_strings = self
            .agents
            .iter()
            .flat_map(|a| [a.role.as_str(), a.goal.as_str(), a.backstory.as_str()]);
        let task_strings = self
            .tasks
            .iter()
            .flat_map(|t| [t.description.as_str(), t.expected_output.as_str()]);
        agent_strings.chain(task_strings)
    }

    /// Build a crew from this configuration, rendering templates with `params`
    pub fn to_crew(&self, params: &ReportParams) -> Result<Crew, ValidationError> {
        params.validate()?;
        let vars = params.template_variables();
        let render = |template: &str| render_template(template, &vars);

        let mut builder = Crew::builder(self.name.clone());
        let mut refs = HashMap::new();
        for agent in &self.agents {
            let agent_ref = builder.agent(
                AgentDefinition::new(
                    render(&agent.role),
                    render(&agent.goal),
                    render(&agent.backstory),
                )
                .with_delegation(agent.allow_delegation),
            );
            refs.insert(agent.id.as_str(), agent_ref);
        }

        for (task_index, task) in self.tasks.iter().enumerate() {
            let agent_ref = refs
                .get(task.agent.as_str())
                .copied()
                .ok_or(ValidationError::ForeignAgent { task_index })?;
            builder.task(
                agent_ref,
                render(&task.description),
                render(&task.expected_output),
            );
        }

        builder.build()
    }
}
