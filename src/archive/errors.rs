//! Archive error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching or decompressing the bundle.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The archive request could not be completed.
    #[error("archive request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("archive source returned HTTP {status}")]
    Status { status: u16 },

    /// Local I/O failure while writing or reading the bundle.
    #[error("archive I/O failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The downloaded bundle is not a readable archive.
    #[error("corrupt archive {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

/// Result type for archive operations
pub type FetchResult<T> = Result<T, FetchError>;
