//! CLI command definitions

use crate::agent::client::{DEFAULT_BASE_URL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS};
use crate::core::{TargetLength, Tone, DEFAULT_MODEL};
use clap::Args;
use std::path::PathBuf;

/// Research a topic and write a report
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Topic to research
    #[arg(short, long, default_value = "")]
    pub topic: String,

    /// Writing tone of the report
    #[arg(long, value_enum, default_value_t = ToneArg::Professional)]
    pub tone: ToneArg,

    /// Target length in words
    #[arg(long, value_enum, default_value_t = LengthArg::Words500)]
    pub length: LengthArg,

    /// Model identifier (see `crewx models`)
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature, 0.0 to 1.0
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout for each model request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Crew YAML file to run instead of the built-in research crew
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Directory to export the report into
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Don't write the report to a file
    #[arg(long)]
    pub no_export: bool,

    /// Don't save the run to history
    #[arg(long)]
    pub no_history: bool,
}

/// Validate a crew configuration file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to crew YAML file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List supported models
#[derive(Debug, Args, Clone)]
pub struct ModelsCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show run history
#[derive(Debug, Args, Clone)]
pub struct HistoryCommand {
    /// Number of recent runs to show
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Show full details
    #[arg(long)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show a specific run by execution ID
    #[arg(long)]
    pub execution_id: Option<String>,
}

/// Tone argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ToneArg {
    Professional,
    Technical,
    Creative,
    Concise,
}

impl From<ToneArg> for Tone {
    fn from(arg: ToneArg) -> Self {
        match arg {
            ToneArg::Professional => Tone::Professional,
            ToneArg::Technical => Tone::Technical,
            ToneArg::Creative => Tone::Creative,
            ToneArg::Concise => Tone::Concise,
        }
    }
}

/// Target length argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LengthArg {
    #[clap(name = "300")]
    Words300,
    #[clap(name = "500")]
    Words500,
    #[clap(name = "800")]
    Words800,
    #[clap(name = "1000")]
    Words1000,
}

impl From<LengthArg> for TargetLength {
    fn from(arg: LengthArg) -> Self {
        match arg {
            LengthArg::Words300 => TargetLength::Words300,
            LengthArg::Words500 => TargetLength::Words500,
            LengthArg::Words800 => TargetLength::Words800,
            LengthArg::Words1000 => TargetLength::Words1000,
        }
    }
}
