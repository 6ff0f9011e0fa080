//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::pipeline::RunError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid lookup pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
