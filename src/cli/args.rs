//! CLI argument definitions using clap
//!
//! Commands:
//! - aeroreg serve
//! - aeroreg run [--skip-download]
//!
//! Configuration comes from the environment, not from flags, so the
//! service runs identically under a scheduler and by hand.

use clap::{Parser, Subcommand};

/// aeroreg - Aircraft registry ETL and lookup service
#[derive(Parser, Debug)]
#[command(name = "aeroreg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the read API server
    Serve,

    /// Execute one pipeline run and exit
    Run {
        /// Reuse the already-downloaded bundle instead of fetching
        #[arg(long)]
        skip_download: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
