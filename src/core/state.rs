//! Execution state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Overall run status
///
/// `Pending -> Running -> Completed | Failed`. Terminal states never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Run has not started
    Pending,
    /// Run is processing the task at `task_index`
    Running { task_index: usize },
    /// All tasks finished, result available
    Completed,
    /// The task at `task_index` failed; later tasks never ran
    Failed { task_index: usize },
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Completed | ExecutionStatus::Failed { .. }
        )
    }

    /// Status name without the task index
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "Pending",
            ExecutionStatus::Running { .. } => "Running",
            ExecutionStatus::Completed => "Completed",
            ExecutionStatus::Failed { .. } => "Failed",
        }
    }

    /// Task index carried by the status, if any
    pub fn task_index(&self) -> Option<usize> {
        match self {
            ExecutionStatus::Running { task_index } | ExecutionStatus::Failed { task_index } => {
                Some(*task_index)
            }
            _ => None,
        }
    }

    /// Rebuild a status from its label and task index
    pub fn from_parts(label: &str, task_index: Option<usize>) -> Option<Self> {
        match (label, task_index) {
            ("Pending", _) => Some(ExecutionStatus::Pending),
            ("Running", Some(task_index)) => Some(ExecutionStatus::Running { task_index }),
            ("Completed", _) => Some(ExecutionStatus::Completed),
            ("Failed", Some(task_index)) => Some(ExecutionStatus::Failed { task_index }),
            _ => None,
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.task_index() {
            Some(index) => write!(f, "{} (task {})", self.label(), index + 1),
            None => f.write_str(self.label()),
        }
    }
}

/// State of a single task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskState {
    /// Task has not run (yet, or ever if an earlier task failed)
    Pending,
    /// Task's completion call is in flight
    Running { started_at: DateTime<Utc> },
    /// Task completed successfully
    Completed {
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    /// Task's completion call failed
    Failed {
        error: String,
        started_at: DateTime<Utc>,
        failed_at: DateTime<Utc>,
    },
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed { .. } | TaskState::Failed { .. })
    }

    fn started_at(&self) -> DateTime<Utc> {
        match self {
            TaskState::Running { started_at }
            | TaskState::Completed { started_at, .. }
            | TaskState::Failed { started_at, .. } => *started_at,
            TaskState::Pending => Utc::now(),
        }
    }
}

/// State of one crew run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// Current execution status
    pub status: ExecutionStatus,

    /// When execution started
    pub started_at: Option<DateTime<Utc>>,

    /// When execution completed/failed
    pub completed_at: Option<DateTime<Utc>>,

    /// Per-task state, in crew order
    pub tasks: Vec<TaskState>,
}

impl RunState {
    /// Create a new pending run state
    pub fn new() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            status: ExecutionStatus::Pending,
            started_at: None,
            completed_at: None,
            tasks: Vec::new(),
        }
    }

    /// Mark run as started with `total_tasks` pending tasks
    pub(crate) fn start(&mut self, total_tasks: usize) {
        self.started_at = Some(Utc::now());
        self.tasks = vec![TaskState::Pending; total_tasks];
    }

    /// Mark the task at `index` as running
    pub(crate) fn begin_task(&mut self, index: usize) {
        if self.status.is_terminal() {
            return;
        }
        self.status = ExecutionStatus::Running { task_index: index };
        if let Some(task) = self.tasks.get_mut(index) {
            *task = TaskState::Running {
                started_at: Utc::now(),
            };
        }
    }

    /// Mark the task at `index` as completed
    pub(crate) fn complete_task(&mut self, index: usize) {
        if let Some(task) = self.tasks.get_mut(index) {
            *task = TaskState::Completed {
                started_at: task.started_at(),
                completed_at: Utc::now(),
            };
        }
    }

    /// Mark the task at `index` and the whole run as failed
    pub(crate) fn fail_task(&mut self, index: usize, error: String) {
        if self.status.is_terminal() {
            return;
        }
        let now = Utc::now();
        if let Some(task) = self.tasks.get_mut(index) {
            *task = TaskState::Failed {
                error,
                started_at: task.started_at(),
                failed_at: now,
            };
        }
        self.status = ExecutionStatus::Failed { task_index: index };
        self.completed_at = Some(now);
    }

    /// Mark run as completed
    pub(crate) fn complete(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = ExecutionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| matches!(t, TaskState::Completed { .. }))
            .count()
    }

    /// Calculate progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        self.completed_tasks() as f64 / self.tasks.len() as f64
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
