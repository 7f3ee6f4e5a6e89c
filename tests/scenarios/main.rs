//! Scenario-based tests for crewx

#[path = "../helpers.rs"]
mod helpers;

mod crew_config;
mod failure_handling;
mod success_chain;
mod validation;
