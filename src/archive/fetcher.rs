//! Bundle download

use std::fs;
use std::path::PathBuf;

use crate::config::ServiceConfig;
use crate::observability::Logger;

use super::errors::{FetchError, FetchResult};

/// Downloads the registry bundle to the scratch directory.
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    source_url: String,
    scratch_dir: PathBuf,
    archive_path: PathBuf,
}

impl ArchiveFetcher {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            source_url: config.source_url.clone(),
            scratch_dir: config.scratch_dir.clone(),
            archive_path: config.archive_path(),
        }
    }

    /// Fetch the bundle to its local path, creating the scratch
    /// directory if needed. Returns the path of the downloaded file.
    pub async fn download(&self) -> FetchResult<PathBuf> {
        fs::create_dir_all(&self.scratch_dir).map_err(|e| FetchError::Io {
            path: self.scratch_dir.clone(),
            source: e,
        })?;

        Logger::info("ARCHIVE_DOWNLOAD_STARTED", &[("url", &self.source_url)]);

        let response = reqwest::get(&self.source_url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        fs::write(&self.archive_path, &bytes).map_err(|e| FetchError::Io {
            path: self.archive_path.clone(),
            source: e,
        })?;

        Logger::info(
            "ARCHIVE_DOWNLOAD_COMPLETE",
            &[
                ("bytes", &bytes.len().to_string()),
                ("path", &self.archive_path.display().to_string()),
            ],
        );

        Ok(self.archive_path.clone())
    }
}
