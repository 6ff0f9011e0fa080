//! Staged publisher
//!
//! The staging collection has a deterministic name derived from the
//! live one, never a unique per-run name: a crashed run's residue is
//! implicitly reclaimed when the next run clears staging. The caller
//! (pipeline runner) guarantees only one run owns staging at a time.

use std::sync::Arc;

use crate::normalizer::Row;
use crate::observability::Logger;
use crate::store::CollectionStore;

use super::canonical::canonicalize_nulls;
use super::errors::{PublishError, PublishResult};

/// Outcome of a successful publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReport {
    /// Number of records promoted to the live collection
    pub records: usize,
}

/// Writes a merged record set into staging and atomically promotes it.
pub struct StagedPublisher {
    store: Arc<dyn CollectionStore>,
    live: String,
}

impl StagedPublisher {
    pub fn new(store: Arc<dyn CollectionStore>, live_collection: impl Into<String>) -> Self {
        Self {
            store,
            live: live_collection.into(),
        }
    }

    /// Name of the live, queryable collection.
    pub fn live_collection(&self) -> &str {
        &self.live
    }

    /// Reserved name of the staging collection.
    pub fn staging_collection(&self) -> String {
        format!("{}_staged", self.live)
    }

    /// Stage every record, then atomically promote staging to live.
    ///
    /// On a write failure the run aborts: staging is cleared, the
    /// promotion never happens and the previous live dataset remains
    /// authoritative. At most one promotion happens per call.
    pub fn publish(&self, records: Vec<Row>) -> PublishResult<PublishReport> {
        let staging = self.staging_collection();

        // Reclaim residue from any crashed previous run.
        self.store
            .drop_collection(&staging)
            .map_err(PublishError::ClearStaging)?;

        let total = records.len();
        for (index, record) in records.into_iter().enumerate() {
            let record = canonicalize_nulls(record);
            if let Err(source) = self.store.insert(&staging, record) {
                Logger::error(
                    "STAGING_WRITE_FAILED",
                    &[
                        ("collection", staging.as_str()),
                        ("record", &index.to_string()),
                        ("reason", &source.to_string()),
                    ],
                );
                // Leave nothing behind; the live dataset is untouched.
                let _ = self.store.drop_collection(&staging);
                return Err(PublishError::Write { index, source });
            }
        }

        self.store
            .rename_collection(&staging, &self.live)
            .map_err(PublishError::Promote)?;

        Logger::info(
            "DATASET_PROMOTED",
            &[
                ("collection", self.live.as_str()),
                ("records", &total.to_string()),
            ],
        );

        Ok(PublishReport { records: total })
    }
}
