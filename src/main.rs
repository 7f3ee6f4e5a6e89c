use anyhow::{Context, Result};
use crewx::agent::GroqClient;
use crewx::cli::commands::{HistoryCommand, ModelsCommand, RunCommand, ValidateCommand};
use crewx::cli::output::*;
use crewx::cli::{Cli, Command};
use crewx::core::config::CrewConfig;
use crewx::core::{
    Crew, CrewError, ExecutionStatus, ReportParams, DEFAULT_MODEL, SUPPORTED_MODELS,
};
use crewx::execution::{ExecutionEngine, ExecutionEvent};
use crewx::persistence::{create_summary, ExecutionSummary, PersistenceBackend};
use std::sync::Arc;
use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Exit code for missing or invalid input
const EXIT_INVALID_INPUT: i32 = 2;

/// Exit code for a failed run
const EXIT_RUN_FAILED: i32 = 1;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; stdout is reserved for the report
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_crew(cmd).await?,
        Command::Validate(cmd) => validate_crew(cmd)?,
        Command::Models(cmd) => list_models(cmd)?,
        Command::History(cmd) => show_history(cmd).await?,
    }

    Ok(())
}

async fn run_crew(cmd: &RunCommand) -> Result<()> {
    let params = ReportParams::new(cmd.topic.clone(), cmd.api_key.clone())
        .with_tone(cmd.tone.into())
        .with_length(cmd.length.into())
        .with_model(cmd.model.clone());

    // Build the crew; parameter problems stop here without any model call
    let crew = match &cmd.file {
        Some(path) => {
            let config = CrewConfig::from_file(path)
                .with_context(|| format!("Failed to load crew config {}", path.display()))?;
            println!("{} Loaded crew: {}", INFO, style(&config.name).bold());
            config.to_crew(&params)
        }
        None => Crew::research_report(&params),
    };
    let crew = match crew {
        Ok(crew) => crew,
        Err(e) => exit_with_error(&CrewError::from(e), EXIT_INVALID_INPUT),
    };

    let config = params
        .client_config()
        .with_temperature(cmd.temperature)
        .with_base_url(cmd.base_url.clone())
        .with_timeout(cmd.timeout_secs);
    debug!("Client config: {:?}", config);

    // Set up persistence
    let store = history_store(cmd.no_history).await?;

    let client = GroqClient::new().context("Failed to create HTTP client")?;
    let spinner = create_spinner();
    let progress = spinner.clone();
    let mut engine = ExecutionEngine::new(client, config).with_event_handler(move |event| {
        if let ExecutionEvent::TaskStarted { agent_role, .. } = &event {
            progress.set_message(format!("{} is thinking...", agent_role));
        }
        progress.println(format_execution_event(&event));
    });

    let result = engine.execute(&crew).await;
    spinner.finish_and_clear();

    let mut summary = create_summary(engine.state(), crew.name(), params.topic(), &params.model);

    let outcome = match result {
        Ok(report) => {
            print_report(params.topic(), report.text());
            if !cmd.no_export {
                let path = report
                    .export(&cmd.output_dir, params.topic())
                    .with_context(|| format!("Failed to export report to {}", cmd.output_dir.display()))?;
                println!("\n{} Report saved to {}", CHECK, style(path.display()).cyan());
                summary = summary.with_report_path(path.display().to_string());
            }
            Ok(())
        }
        Err(e) => Err(e),
    };

    // Only runs that actually started are recorded
    if let Some(store) = store.filter(|_| summary.status != ExecutionStatus::Pending) {
        match store.save_execution(&summary).await {
            Ok(()) => println!(
                "{} Run saved to history (ID: {})",
                INFO,
                style(&summary.execution_id.to_string()[..8]).dim()
            ),
            Err(e) => warn!("Failed to save run history: {:#}", e),
        }
    }

    if let Err(e) = outcome {
        let code = if e.is_missing_input() {
            EXIT_INVALID_INPUT
        } else {
            EXIT_RUN_FAILED
        };
        exit_with_error(&e, code);
    }

    Ok(())
}

fn exit_with_error(err: &CrewError, code: i32) -> ! {
    eprintln!("{}", format_crew_error(err));
    std::process::exit(code);
}

/// History store for a run, or `None` when history is disabled
async fn history_store(no_history: bool) -> Result<Option<Arc<dyn PersistenceBackend>>> {
    if no_history {
        return Ok(None);
    }
    open_history_store().await.map(Some)
}

#[cfg(feature = "sqlite")]
async fn open_history_store() -> Result<Arc<dyn PersistenceBackend>> {
    let store = crewx::persistence::SqliteExecutionStore::with_default_path()
        .await
        .context("Failed to open history database")?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "sqlite"))]
async fn open_history_store() -> Result<Arc<dyn PersistenceBackend>> {
    warn!("Built without the sqlite feature; run history is kept in memory only");
    Ok(Arc::new(crewx::persistence::InMemoryPersistence::new()))
}

fn validate_crew(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating crew...", INFO);

    match CrewConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Crew configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Agents: {}", style(config.agents.len()).cyan());
            println!("  Tasks: {}", style(config.tasks.len()).cyan());
            for (index, task) in config.tasks.iter().enumerate() {
                println!("    {}. {} {}", index + 1, style(&task.agent).bold(), style(&task.description).dim());
            }

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(EXIT_INVALID_INPUT);
        }
    }
}

fn list_models(cmd: &ModelsCommand) -> Result<()> {
    if cmd.json {
        let data = serde_json::json!({
            "default": DEFAULT_MODEL,
            "models": SUPPORTED_MODELS,
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{} Supported models:", INFO);
    for model in SUPPORTED_MODELS {
        if *model == DEFAULT_MODEL {
            println!("  {} {}", style(model).bold(), style("(default)").dim());
        } else {
            println!("  {}", model);
        }
    }
    Ok(())
}

async fn show_history(cmd: &HistoryCommand) -> Result<()> {
    let store = open_history_store().await?;

    // If specific execution ID is requested
    if let Some(exec_id_str) = &cmd.execution_id {
        let exec_id = uuid::Uuid::parse_str(exec_id_str).context("Invalid execution ID format")?;

        match store.load_execution(exec_id).await? {
            Some(summary) => print_execution_details(&summary, cmd.verbose)?,
            None => println!("{} Execution not found", WARN),
        }
        return Ok(());
    }

    let executions = store.list_recent(cmd.limit).await?;

    if cmd.json {
        let data = serde_json::json!({ "executions": executions });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    if executions.is_empty() {
        println!("{} No runs found", INFO);
        return Ok(());
    }

    println!("{} Run history (showing latest {}):", INFO, cmd.limit);
    for summary in &executions {
        println!("  {}", format_execution_summary(summary));
    }

    Ok(())
}

fn print_execution_details(summary: &ExecutionSummary, verbose: bool) -> Result<()> {
    println!("{} Run Details", INFO);
    println!("  ID: {}", style(summary.execution_id).cyan());
    println!("  Crew: {}", style(&summary.crew_name).bold());
    println!("  Topic: {}", style(&summary.topic).bold());
    println!("  Model: {}", style(&summary.model).cyan());
    println!("  Status: {}", format_status(summary.status));
    println!("  Started: {}", style(summary.started_at.to_rfc3339()).dim());
    if let Some(completed) = summary.completed_at {
        println!("  Completed: {}", style(completed.to_rfc3339()).dim());
        if let Ok(duration) = completed.signed_duration_since(summary.started_at).to_std() {
            println!("  Duration: {}", style(format_duration(duration)).dim());
        }
    }
    println!("  Tasks: {}/{}", summary.completed_tasks, summary.total_tasks);
    if let Some(path) = &summary.report_path {
        println!("  Report: {}", style(path).cyan());
    }

    if verbose {
        println!("\n  {}", style("Full details:").bold());
        let json = serde_json::to_string_pretty(summary)?;
        for line in json.lines() {
            println!("    {}", line);
        }
    }

    Ok(())
}

fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
