//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FactCheck CLI - Verify statements against live web evidence.
#[derive(Debug, Parser)]
#[command(name = "factcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FACTCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fact-check a statement
    Check(CheckArgs),

    /// Show past fact-checks, newest first
    History(HistoryArgs),

    /// Run the HTTP server
    Serve(ServeArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// The statement to check
    pub statement: String,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Maximum number of entries
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}
