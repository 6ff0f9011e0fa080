//! Bundle decompression

use std::fs::File;
use std::path::PathBuf;

use crate::config::ServiceConfig;
use crate::observability::Logger;

use super::errors::{FetchError, FetchResult};

/// Decompresses the downloaded bundle into the scratch directory.
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    archive_path: PathBuf,
    scratch_dir: PathBuf,
}

impl ArchiveExtractor {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            archive_path: config.archive_path(),
            scratch_dir: config.scratch_dir.clone(),
        }
    }

    /// Extract every file in the bundle into the scratch directory.
    pub fn extract(&self) -> FetchResult<()> {
        let file = File::open(&self.archive_path).map_err(|e| FetchError::Io {
            path: self.archive_path.clone(),
            source: e,
        })?;

        let mut archive = zip::ZipArchive::new(file).map_err(|e| FetchError::Corrupt {
            path: self.archive_path.clone(),
            source: e,
        })?;

        archive
            .extract(&self.scratch_dir)
            .map_err(|e| FetchError::Corrupt {
                path: self.archive_path.clone(),
                source: e,
            })?;

        Logger::info(
            "ARCHIVE_EXTRACTED",
            &[
                ("files", &archive.len().to_string()),
                ("dir", &self.scratch_dir.display().to_string()),
            ],
        );

        Ok(())
    }
}
