//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{HistoryCommand, ModelsCommand, RunCommand, ValidateCommand};
use std::ffi::OsString;

/// Research and writing crew powered by hosted language models
#[derive(Debug, Parser, Clone)]
#[command(name = "crewx")]
#[command(version)]
#[command(about = "Research a topic and write a report with a two-agent crew", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Research a topic and write a report
    Run(RunCommand),

    /// Validate a crew configuration file
    Validate(ValidateCommand),

    /// List supported models
    Models(ModelsCommand),

    /// Show run history
    History(HistoryCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
