//! Execution context - outputs of completed tasks, threaded into later prompts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accumulated outputs for one crew run
///
/// Owned by the execution engine; entries are appended in task order and
/// never modified afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionContext {
    outputs: Vec<TaskOutput>,
}

/// Text produced by one completed task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Position of the task in the crew
    pub task_index: usize,

    /// Role of the agent that produced it
    pub agent_role: String,

    /// The completion text
    pub text: String,

    /// When the task finished
    pub completed_at: DateTime<Utc>,
}

impl ExecutionContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the output of a completed task
    pub(crate) fn push(&mut self, task_index: usize, agent_role: &str, text: String) {
        self.outputs.push(TaskOutput {
            task_index,
            agent_role: agent_role.to_string(),
            text,
            completed_at: Utc::now(),
        });
    }

    /// All outputs, in the order they were produced
    pub fn outputs(&self) -> &[TaskOutput] {
        &self.outputs
    }

    /// Output of a task by index
    pub fn output_of(&self, task_index: usize) -> Option<&TaskOutput> {
        self.outputs.iter().find(|o| o.task_index == task_index)
    }

    /// Most recent output
    pub fn last(&self) -> Option<&TaskOutput> {
        self.outputs.last()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Consume the context, keeping only the last output's text
    pub(crate) fn into_last_text(mut self) -> Option<String> {
        self.outputs.pop().map(|o| o.text)
    }

    /// Format all outputs for inclusion in a prompt
    pub fn format_for_prompt(&self) -> String {
        self.outputs
            .iter()
            .map(|output| {
                let mut section = format!(
                    "### Output of task {} ({})\n{}",
                    output.task_index + 1,
                    output.agent_role,
                    output.text
                );
                if !section.ends_with('\n') {
                    section.push('\n');
                }
                section
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
