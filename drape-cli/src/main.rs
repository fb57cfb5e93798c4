//! Drape CLI - Command-line interface
//!
//! Serves the search API, queries a running server, and prints
//! catalog statistics.

mod commands;

use clap::Parser;
use drape_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "drape")]
#[command(about = "Fashion product search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Log level for console output
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: CliLogLevel,

    /// Shorthand for `--log-level debug`
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        CliLogLevel::Debug
    } else {
        cli.log_level
    };
    init_tracing(level.as_tracing_level())?;

    commands::handle_command(cli.command).await
}
