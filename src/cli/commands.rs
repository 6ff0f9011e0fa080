//! CLI command implementations
//!
//! Wires the store, pipeline runner and HTTP server together from one
//! configuration structure and hands control to the chosen command.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::http_server::HttpServer;
use crate::observability::Logger;
use crate::pipeline::PipelineRunner;
use crate::store::{CollectionStore, MemoryStore};

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Entry point called from main.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = ServiceConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        Command::Serve => runtime.block_on(serve(config)),
        Command::Run { skip_download } => runtime.block_on(run_once(config, skip_download)),
    }
}

/// Boot the read API and serve until the process exits.
async fn serve(config: ServiceConfig) -> CliResult<()> {
    let store: Arc<dyn CollectionStore> = Arc::new(MemoryStore::new());
    let runner = Arc::new(PipelineRunner::new(config.clone(), store.clone()));

    let server = HttpServer::new(config, store, runner)?;
    server.start().await?;
    Ok(())
}

/// Execute one pipeline run against a fresh store and exit. Exercises
/// the bundle end to end; failures come back as a non-zero exit.
async fn run_once(config: ServiceConfig, skip_download: bool) -> CliResult<()> {
    let store: Arc<dyn CollectionStore> = Arc::new(MemoryStore::new());
    let runner = PipelineRunner::new(config, store);

    let report = if skip_download {
        runner.run_from_archive().await?
    } else {
        runner.run_full().await?
    };

    Logger::info(
        "ONE_SHOT_RUN_COMPLETE",
        &[("records", &report.records.to_string())],
    );
    Ok(())
}
