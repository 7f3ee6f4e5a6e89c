//! Task executor - runs individual tasks against the completion client

use crate::{
    agent::{ClientConfig, LlmClient, LlmError},
    core::{assemble_prompt, AgentDefinition, ExecutionContext, TaskDefinition},
};
use tracing::{debug, error, info};

/// Executes a single task
pub struct TaskExecutor<C> {
    client: C,
}

impl<C: LlmClient> TaskExecutor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Execute a task and return the completion text
    ///
    /// Exactly one `generate` call is made; errors are passed through untouched.
    pub async fn execute(
        &self,
        task_index: usize,
        agent: &AgentDefinition,
        task: &TaskDefinition,
        context: &ExecutionContext,
        config: &ClientConfig,
    ) -> Result<String, LlmError> {
        info!("Executing task {} ({})", task_index + 1, agent.role());

        let prompt = assemble_prompt(agent, task, context);
        debug!("Effective prompt for task {}: {}", task_index + 1, prompt);

        match self.client.generate(&prompt, config).await {
            Ok(completion) => {
                debug!(
                    "Completion for task {}: {} chars, usage {:?}",
                    task_index + 1,
                    completion.content.len(),
                    completion.usage
                );
                Ok(completion.content)
            }
            Err(e) => {
                error!("Client error for task {}: {}", task_index + 1, e);
                Err(e)
            }
        }
    }
}
