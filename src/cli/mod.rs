//! CLI module for aeroreg
//!
//! Commands:
//! - serve: boot the read API and wait for lookups and triggers
//! - run: execute one pipeline run and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
