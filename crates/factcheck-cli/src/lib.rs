//! FactCheck CLI library.
//!
//! Command-line access to the fact-check pipeline: check a statement, browse
//! the local history, or run the HTTP server.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::{Formatter, OutputFormat};
