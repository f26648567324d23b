//! FactCheck CLI - Command-line interface for the fact-check pipeline.

use clap::Parser;
use factcheck_cli::commands;
use factcheck_cli::{config, Cli, Command, Formatter, OutputFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> factcheck_cli::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let formatter = Formatter::new(format, !cli.no_color);

    match cli.command {
        Command::Check(args) => {
            init_cli_tracing();
            commands::execute_check(args, &config, &formatter).await?;
        }
        Command::History(args) => {
            init_cli_tracing();
            commands::execute_history(args, &config, &formatter)?;
        }
        Command::Serve(args) => {
            // The server installs its own subscriber
            commands::execute_serve(args, config).await?;
        }
    }

    Ok(())
}

/// Quiet logging on stderr so stdout stays clean for results
fn init_cli_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
