//! avert - deadlock-avoidance resource allocation simulator
//!
//! Drives the Banker's Algorithm allocation engine from the command
//! line, either through the built-in demo scenarios or a TOML
//! scenario file.

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

mod cli;
mod demo;
mod display;
mod error;
mod scenario;

use crate::cli::{Cli, Commands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::scenario::Scenario;
use avert_types::ColorChoice;
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    // Initialize tracing with JSON awareness
    init_tracing(json_mode, cli.global.debug);

    // Run the application and handle errors
    if let Err(e) = run(&cli) {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
fn run(cli: &Cli) -> Result<(), CliError> {
    info!("Starting avert v{}", env!("CARGO_PKG_VERSION"));

    let color = cli.global.color.unwrap_or(ColorChoice::Auto);
    let renderer = OutputRenderer::new(cli.global.json, color);

    match &cli.command {
        Commands::Demo { number } => demo::run(*number, &renderer),
        Commands::Run { scenario } => {
            let scenario = Scenario::load(scenario)?;
            scenario.execute(&renderer)
        }
    }
}

/// Initialize the tracing subscriber
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if json_mode {
        // JSON mode: suppress console logging to avoid contaminating output
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        // Debug mode: structured logs to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,avert=debug")),
            )
            .init();
    } else {
        // Normal mode: warnings and errors only
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}
