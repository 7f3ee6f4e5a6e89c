//! Core domain models for crewx
//!
//! This module defines the fundamental data structures that represent
//! agents, tasks, crews, and the state of a run.

pub mod agent;
pub mod config;
pub mod context;
pub mod crew;
pub mod error;
pub mod params;
pub mod prompt;
pub mod report;
pub mod state;
pub mod task;

pub use agent::*;
pub use context::*;
pub use crew::{Crew, CrewBuilder};
pub use error::*;
pub use params::*;
pub use prompt::{assemble_prompt, placeholders, render_template};
pub use report::*;
pub use state::*;
pub use task::*;
