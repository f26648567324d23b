//! History command implementation.

use crate::cli::HistoryArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use factcheck_domain::traits::HistoryStore;
use factcheck_server::config::ServerConfig;
use factcheck_store::SqliteHistoryStore;

/// Execute the history command.
pub fn execute_history(args: HistoryArgs, config: &ServerConfig, formatter: &Formatter) -> Result<()> {
    if args.limit == 0 {
        return Err(CliError::InvalidInput("Limit must be greater than 0".to_string()));
    }

    let store = SqliteHistoryStore::new(&config.database_path)?;
    let entries = store.recent(Some(args.limit))?;

    println!("{}", formatter.format_history(&entries)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_zero_limit_rejected() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let config = ServerConfig::default_config();
        let result = execute_history(HistoryArgs { limit: 0 }, &config, &formatter);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_reads_configured_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default_config();
        config.database_path = dir.path().join("history.db");

        let formatter = Formatter::new(OutputFormat::Json, false);
        assert!(execute_history(HistoryArgs { limit: 5 }, &config, &formatter).is_ok());
        assert!(config.database_path.exists());
    }
}
