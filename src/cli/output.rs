//! CLI output formatting

use crate::{
    core::{CrewError, ExecutionStatus},
    execution::ExecutionEvent,
    persistence::ExecutionSummary,
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

const SEPARATOR_WIDTH: usize = 80;

/// Create the "agents are thinking" spinner
pub fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running { task_index } => {
            style(format!("RUNNING (task {})", task_index + 1)).yellow().to_string()
        }
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed { task_index } => {
            style(format!("FAILED (task {})", task_index + 1)).red().to_string()
        }
    }
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Format execution summary for display
pub fn format_execution_summary(summary: &ExecutionSummary) -> String {
    let status_icon = match summary.status {
        ExecutionStatus::Completed => CHECK,
        ExecutionStatus::Failed { .. } => CROSS,
        ExecutionStatus::Running { .. } => SPINNER,
        ExecutionStatus::Pending => INFO,
    };

    format!(
        "{} {} - {} - {} - {} ({}/{}) - {}",
        status_icon,
        style(short_id(&summary.execution_id)).dim(),
        style(summary.started_at.format("%Y-%m-%d %H:%M")).dim(),
        style(&summary.topic).bold(),
        format_status(summary.status),
        summary.completed_tasks,
        summary.total_tasks,
        style(&summary.model).cyan()
    )
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::RunStarted {
            execution_id,
            crew_name,
            total_tasks,
        } => format!(
            "{} Starting crew {} ({}) with {} tasks",
            ROCKET,
            style(crew_name).bold(),
            style(short_id(execution_id)).dim(),
            total_tasks
        ),
        ExecutionEvent::TaskStarted {
            task_index,
            agent_role,
        } => format!(
            "{} Task {}: {} is thinking...",
            SPINNER,
            task_index + 1,
            style(agent_role).cyan()
        ),
        ExecutionEvent::TaskCompleted {
            task_index,
            agent_role,
            output_chars,
        } => format!(
            "{} Task {}: {} {}",
            CHECK,
            task_index + 1,
            style(agent_role).green(),
            style(format!("({} chars)", output_chars)).dim()
        ),
        ExecutionEvent::TaskFailed {
            task_index,
            agent_role,
            error,
        } => format!(
            "{} Task {}: {}: {}",
            CROSS,
            task_index + 1,
            style(agent_role).red(),
            style(error).dim()
        ),
        ExecutionEvent::RunFinished {
            execution_id,
            status,
        } => {
            let status_str = match status {
                ExecutionStatus::Completed => format!("{} completed", style("successfully").green()),
                ExecutionStatus::Failed { .. } => style("failed").red().to_string(),
                other => other.to_string(),
            };
            format!(
                "{} Crew ({}) {}",
                INFO,
                style(short_id(execution_id)).dim(),
                status_str
            )
        }
    }
}

/// Format a run failure with guidance for the user
///
/// Missing input and execution failures get different hints.
pub fn format_crew_error(err: &CrewError) -> String {
    if err.is_missing_input() {
        format!("{} {}", WARN, style(err.user_message()).yellow())
    } else {
        let mut message = format!("{} {}", CROSS, style(err.user_message()).red());
        if let Some(llm_error) = err.llm_error() {
            message.push_str(&format!("\n  {}", style(llm_error).dim()));
        }
        message
    }
}

/// Horizontal rule sized to the terminal
pub fn separator() -> String {
    let width = term_size::dimensions()
        .map(|(w, _)| w.min(SEPARATOR_WIDTH))
        .unwrap_or(SEPARATOR_WIDTH);
    "─".repeat(width)
}

/// Print the final report under a header
pub fn print_report(topic: &str, text: &str) {
    println!();
    println!("{}", style(separator()).dim());
    println!("{} {}", style("Final Report:").bold(), style(topic).cyan());
    println!("{}", style(separator()).dim());
    println!("{}", text);
    println!("{}", style(separator()).dim());
}
