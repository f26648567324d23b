//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use factcheck_pipeline::FactCheck;
use factcheck_server::{build_state, config::ServerConfig};

/// Execute the check command.
///
/// Runs the pipeline in-process; the result is also recorded in the local
/// history database.
pub async fn execute_check(args: CheckArgs, config: &ServerConfig, formatter: &Formatter) -> Result<()> {
    if args.statement.trim().is_empty() {
        return Err(CliError::InvalidInput("Statement cannot be empty".to_string()));
    }

    let state = build_state(config)?;

    let result = tokio::time::timeout(state.request_timeout, state.checker.fact_check(&args.statement))
        .await
        .map_err(|_| CliError::Timeout(state.request_timeout))??;

    println!("{}", formatter.format_verdict(&result)?);

    Ok(())
}
