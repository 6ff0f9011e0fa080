//! Pipeline trigger routes
//!
//! On-demand runs: a full reload, a download-only fetch, and an ETL
//! run against the already-downloaded bundle. Triggers block until the
//! run finishes and report the published record count. A concurrent
//! trigger is refused with 409 while a run is in flight.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::pipeline::PipelineRunner;

use super::errors::ApiResult;

/// Shared state for the trigger handlers.
pub struct PipelineState {
    runner: Arc<PipelineRunner>,
}

impl PipelineState {
    pub fn new(runner: Arc<PipelineRunner>) -> Self {
        Self { runner }
    }
}

/// Trigger response body
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
}

/// Build the trigger router.
pub fn pipeline_routes(state: Arc<PipelineState>) -> Router {
    Router::new()
        .route("/registry-database", get(trigger_full_run))
        .route("/registry-database-zip", get(trigger_download))
        .route("/registry-database-etl", get(trigger_etl_only))
        .with_state(state)
}

async fn trigger_full_run(
    State(state): State<Arc<PipelineState>>,
) -> ApiResult<Json<RunResponse>> {
    let report = state.runner.run_full().await?;
    Ok(Json(RunResponse {
        success: true,
        records: Some(report.records),
    }))
}

async fn trigger_download(
    State(state): State<Arc<PipelineState>>,
) -> ApiResult<Json<RunResponse>> {
    state.runner.download_only().await?;
    Ok(Json(RunResponse {
        success: true,
        records: None,
    }))
}

async fn trigger_etl_only(
    State(state): State<Arc<PipelineState>>,
) -> ApiResult<Json<RunResponse>> {
    let report = state.runner.run_from_archive().await?;
    Ok(Json(RunResponse {
        success: true,
        records: Some(report.records),
    }))
}
