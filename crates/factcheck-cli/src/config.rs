//! Configuration lookup for the CLI.
//!
//! The CLI shares the server's TOML format. An explicit `--config` path wins,
//! then `~/.factcheck/config.toml`, then built-in defaults.

use crate::error::{CliError, Result};
use factcheck_server::config::ServerConfig;
use std::path::{Path, PathBuf};

/// Get the default configuration file path.
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".factcheck").join("config.toml"))
}

/// Load configuration from `explicit`, the default path, or defaults.
pub fn load(explicit: Option<&Path>) -> Result<ServerConfig> {
    if let Some(path) = explicit {
        return Ok(ServerConfig::from_file(path)?);
    }

    match default_path() {
        Ok(path) if path.exists() => Ok(ServerConfig::from_file(&path)?),
        _ => Ok(ServerConfig::default_config()),
    }
}
