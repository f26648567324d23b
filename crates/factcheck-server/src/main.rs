//! FactCheck Server
//!
//! Starts the HTTP server for fact-checking statements.

use factcheck_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Credentials may come from a local .env file
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: factcheck-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_config()
    };

    start_server(config).await
}

fn print_help() {
    println!("FactCheck Server - Evidence-grounded statement verification");
    println!();
    println!("USAGE:");
    println!("    factcheck-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    TAVILY_API_KEY     Search provider credential");
    println!("    GEMINI_API_KEY     Generation provider credential");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("EXAMPLE:");
    println!("    factcheck-server --config config/server.toml");
    println!();
}
