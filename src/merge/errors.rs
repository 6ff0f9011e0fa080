//! Merge error types
//!
//! Join preconditions are checked before any row is produced; a failed
//! precondition aborts the run before staging begins.

use thiserror::Error;

use crate::normalizer::TableRole;

/// Errors raised while merging the normalized tables.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required table was not supplied to the engine.
    #[error("required table absent: {0}")]
    MissingTable(TableRole),

    /// A table is missing the column it joins on.
    #[error("join key column '{column}' missing from {table} table")]
    MissingKeyColumn { table: TableRole, column: String },
}

/// Result type for merge operations
pub type PipelineResult<T> = Result<T, PipelineError>;
