//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::error::Result;
use factcheck_server::{config::ServerConfig, start_server};

/// Execute the serve command.
pub async fn execute_serve(args: ServeArgs, mut config: ServerConfig) -> Result<()> {
    if let Some(port) = args.port {
        config.bind_port = port;
    }

    start_server(config).await?;
    Ok(())
}
