//! # billsplit CLI
//!
//! Thin shell around `billsplit-grid` and `billsplit-core`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  billsplit template ──► write_template() ──► dinner.csv          │
//! │                                                  │               │
//! │                              (fill in names, matrix, prices)     │
//! │                                                  ▼               │
//! │  billsplit compute  ──► load ──► recompute() ──► save            │
//! │                                                                  │
//! │  billsplit split    ──► snapshot.json ──► split() ──► stdout     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from the environment
//! 3. Parse the command line
//! 4. Dispatch to the command handler

pub mod cli;
pub mod commands;
pub mod config;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::CliConfig;

/// Parses the command line and runs the selected command.
pub fn run() -> Result<()> {
    init_tracing();

    let config = CliConfig::from_env()?;
    debug!(?config, "configuration loaded");

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Template(args) => commands::template(&args),
        Command::Compute { input, output } => {
            commands::compute(input.as_deref(), output.as_deref(), &config, &mut stdout)
        }
        Command::Split { snapshot, pretty } => {
            commands::split(&snapshot, pretty, &config, &mut stdout)
        }
    }
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// Set via `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=billsplit_core=trace` - Show trace for the engine only
/// - Default: INFO, DEBUG for the billsplit crates
///
/// Logs go to stderr so JSON on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,billsplit_core=debug,billsplit_grid=debug,billsplit_cli=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
