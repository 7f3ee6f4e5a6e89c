//! Main execution engine - runs a crew's tasks in order

use crate::{
    agent::{ClientConfig, LlmClient},
    core::{Crew, CrewError, ExecutionContext, ExecutionStatus, PipelineResult, RunState, ValidationError},
    execution::TaskExecutor,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Events that can occur during a crew run
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted {
        execution_id: Uuid,
        crew_name: String,
        total_tasks: usize,
    },
    TaskStarted {
        task_index: usize,
        agent_role: String,
    },
    TaskCompleted {
        task_index: usize,
        agent_role: String,
        output_chars: usize,
    },
    TaskFailed {
        task_index: usize,
        agent_role: String,
        error: String,
    },
    RunFinished {
        execution_id: Uuid,
        status: ExecutionStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Sequential crew execution engine
///
/// One engine drives one run. Tasks execute strictly one after another; each
/// task sees the outputs of every task before it. The first client failure
/// ends the run.
pub struct ExecutionEngine<C> {
    executor: TaskExecutor<C>,
    config: ClientConfig,
    state: RunState,
    event_handlers: Vec<EventHandler>,
}

impl<C: LlmClient> ExecutionEngine<C> {
    pub fn new(client: C, config: ClientConfig) -> Self {
        Self {
            executor: TaskExecutor::new(client),
            config,
            state: RunState::new(),
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Builder-style variant of [`add_event_handler`](Self::add_event_handler)
    pub fn with_event_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.add_event_handler(handler);
        self
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// State of the run driven by this engine
    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn status(&self) -> ExecutionStatus {
        self.state.status
    }

    pub fn execution_id(&self) -> Uuid {
        self.state.execution_id
    }

    /// Execute every task of the crew and return the last task's output
    pub async fn execute(&mut self, crew: &Crew) -> Result<PipelineResult, CrewError> {
        if self.state.status != ExecutionStatus::Pending || self.state.started_at.is_some() {
            return Err(CrewError::AlreadyStarted(self.state.status));
        }

        // Pre-flight checks leave the engine pending
        self.config.validate()?;
        if crew.is_empty() {
            return Err(ValidationError::NoTasks.into());
        }

        let execution_id = self.state.execution_id;
        info!(
            "Starting crew execution: {} ({}) with model {}",
            crew.name(),
            execution_id,
            self.config.model
        );
        self.state.start(crew.len());
        self.emit_event(ExecutionEvent::RunStarted {
            execution_id,
            crew_name: crew.name().to_string(),
            total_tasks: crew.len(),
        });

        let mut context = ExecutionContext::new();

        for (task_index, task) in crew.tasks().iter().enumerate() {
            let agent = crew.agent_for(task);

            self.state.begin_task(task_index);
            self.emit_event(ExecutionEvent::TaskStarted {
                task_index,
                agent_role: agent.role().to_string(),
            });

            let result = self
                .executor
                .execute(task_index, agent, task, &context, &self.config)
                .await;

            match result {
                Ok(output) => {
                    let output_chars = output.chars().count();
                    context.push(task_index, agent.role(), output);
                    self.state.complete_task(task_index);
                    self.emit_event(ExecutionEvent::TaskCompleted {
                        task_index,
                        agent_role: agent.role().to_string(),
                        output_chars,
                    });
                }
                Err(source) => {
                    error!(
                        "Crew {} failed at task {} ({}): {}",
                        crew.name(),
                        task_index + 1,
                        agent.role(),
                        source
                    );
                    self.state.fail_task(task_index, source.to_string());
                    self.emit_event(ExecutionEvent::TaskFailed {
                        task_index,
                        agent_role: agent.role().to_string(),
                        error: source.to_string(),
                    });
                    self.emit_event(ExecutionEvent::RunFinished {
                        execution_id,
                        status: self.state.status,
                    });
                    return Err(CrewError::Execution {
                        task_index,
                        agent_role: agent.role().to_string(),
                        source,
                    });
                }
            }
        }

        self.state.complete();
        info!("Crew execution finished: {} - {}", crew.name(), self.state.status);
        self.emit_event(ExecutionEvent::RunFinished {
            execution_id,
            status: self.state.status,
        });

        Ok(PipelineResult::new(context.into_last_text().unwrap_or_default()))
    }
}
