//! Command line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use avert_types::ColorChoice;

/// avert - deadlock-avoidance resource allocation simulator
#[derive(Parser)]
#[command(name = "avert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Deadlock-avoidance resource allocation simulator")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in demo scenarios
    Demo {
        /// Scenario number (1-6); runs all scenarios when omitted
        number: Option<usize>,
    },

    /// Execute a TOML scenario file
    #[command(alias = "r")]
    Run {
        /// Path to the scenario file
        scenario: PathBuf,
    },
}
