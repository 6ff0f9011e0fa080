//! Pipeline run error types
//!
//! One aggregate error for everything that can abort a run. The caller
//! that triggered the run sees the failure; the live dataset does not.

use thiserror::Error;

use crate::archive::FetchError;
use crate::merge::PipelineError;
use crate::normalizer::ParseError;
use crate::publisher::PublishError;

/// Errors surfaced by a pipeline run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Another run currently owns the staging area.
    #[error("a pipeline run is already in progress")]
    RunInProgress,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Merge(#[from] PipelineError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The blocking ETL task panicked or was cancelled.
    #[error("pipeline task aborted: {0}")]
    Aborted(String),
}

/// Result type for pipeline runs
pub type RunResult<T> = Result<T, RunError>;
