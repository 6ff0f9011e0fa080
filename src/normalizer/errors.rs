//! Normalizer error types
//!
//! A missing or structurally unreadable source file fails the run.
//! Unparsable individual date values are nulled by the loader and are
//! never an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a source table.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source file does not exist.
    #[error("source file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// The source file exists but could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The header row could not be read.
    #[error("header row unreadable in {}: {source}", path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data record was malformed.
    #[error("malformed record in {}: {source}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for normalizer operations
pub type ParseResult<T> = Result<T, ParseError>;
