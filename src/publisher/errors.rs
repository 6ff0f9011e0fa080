//! Publisher error types

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised while staging or promoting a dataset.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The store rejected a record during staging. The run aborts and
    /// the previous live dataset remains authoritative.
    #[error("record {index} rejected during staging: {source}")]
    Write {
        index: usize,
        #[source]
        source: StoreError,
    },

    /// Clearing staging residue failed before any record was written.
    #[error("failed to clear staging collection: {0}")]
    ClearStaging(#[source] StoreError),

    /// The atomic promotion itself failed. No partial state is
    /// observable through the live name; the previous dataset still
    /// serves.
    #[error("promotion failed: {0}")]
    Promote(#[source] StoreError),
}

/// Result type for publisher operations
pub type PublishResult<T> = Result<T, PublishError>;
