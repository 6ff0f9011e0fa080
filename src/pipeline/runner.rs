//! Pipeline runner
//!
//! A run is a scoped critical section over the staging collection's
//! identity: the run guard is held for the whole run and a second
//! concurrent trigger fails fast instead of queueing. The CSV-to-
//! published-dataset portion is synchronous and runs on the blocking
//! pool.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::archive::{ArchiveExtractor, ArchiveFetcher};
use crate::config::ServiceConfig;
use crate::merge::{MergeEngine, MergePlan};
use crate::normalizer::{load_table, NormalizedTable, TableRole};
use crate::observability::Logger;
use crate::publisher::StagedPublisher;
use crate::store::CollectionStore;

use super::errors::{RunError, RunResult};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Number of records published to the live collection
    pub records: usize,
}

/// Owns the ETL collaborators and serializes runs.
pub struct PipelineRunner {
    config: ServiceConfig,
    fetcher: ArchiveFetcher,
    extractor: ArchiveExtractor,
    publisher: Arc<StagedPublisher>,
    run_guard: Mutex<()>,
}

impl PipelineRunner {
    pub fn new(config: ServiceConfig, store: Arc<dyn CollectionStore>) -> Self {
        let fetcher = ArchiveFetcher::new(&config);
        let extractor = ArchiveExtractor::new(&config);
        let publisher = Arc::new(StagedPublisher::new(store, config.collection.clone()));
        Self {
            config,
            fetcher,
            extractor,
            publisher,
            run_guard: Mutex::new(()),
        }
    }

    /// Full reload: download, decompress, extract, merge, publish.
    pub async fn run_full(&self) -> RunResult<RunReport> {
        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| RunError::RunInProgress)?;

        Logger::info("PIPELINE_RUN_STARTED", &[("mode", "full")]);
        let report = match self.fetcher.download().await {
            Ok(_) => self.extract_and_publish().await,
            Err(e) => Err(e.into()),
        };
        self.log_outcome(&report);
        report
    }

    /// Download the bundle only, for a later run against it.
    pub async fn download_only(&self) -> RunResult<()> {
        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| RunError::RunInProgress)?;

        self.fetcher.download().await?;
        Ok(())
    }

    /// Run the ETL against an already-downloaded bundle.
    pub async fn run_from_archive(&self) -> RunResult<RunReport> {
        let _guard = self
            .run_guard
            .try_lock()
            .map_err(|_| RunError::RunInProgress)?;

        Logger::info("PIPELINE_RUN_STARTED", &[("mode", "from-archive")]);
        let report = self.extract_and_publish().await;
        self.log_outcome(&report);
        report
    }

    /// Decompress, normalize, merge and publish on the blocking pool.
    async fn extract_and_publish(&self) -> RunResult<RunReport> {
        let extractor = self.extractor.clone();
        let publisher = self.publisher.clone();
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || {
            extractor.extract()?;
            let records = run_etl(&config.scratch_dir)?;
            let report = publisher.publish(records)?;
            if config.cleanup {
                clean_scratch(&config.scratch_dir);
            }
            Ok(RunReport {
                records: report.records,
            })
        })
        .await
        .map_err(|e| RunError::Aborted(e.to_string()))?
    }

    fn log_outcome(&self, report: &RunResult<RunReport>) {
        match report {
            Ok(report) => Logger::info(
                "PIPELINE_RUN_COMPLETE",
                &[("records", &report.records.to_string())],
            ),
            Err(e) => Logger::error("PIPELINE_RUN_FAILED", &[("reason", &e.to_string())]),
        }
    }
}

/// Load and normalize the three tables, then merge them.
fn run_etl(scratch_dir: &Path) -> RunResult<Vec<crate::normalizer::Row>> {
    let mut tables: HashMap<TableRole, NormalizedTable> = HashMap::new();
    for role in TableRole::ALL {
        let path = scratch_dir.join(role.file_name());
        let table = load_table(&path, role)?;
        Logger::info(
            "TABLE_LOADED",
            &[
                ("file", role.file_name()),
                ("role", role.label()),
                ("rows", &table.len().to_string()),
            ],
        );
        tables.insert(role, table);
    }

    let engine = MergeEngine::new(MergePlan::aircraft_registry());
    let records = engine.merge(tables)?;
    Logger::info("TABLES_MERGED", &[("records", &records.len().to_string())]);
    Ok(records)
}

/// Best-effort removal of scratch files after a successful run.
fn clean_scratch(scratch_dir: &Path) {
    Logger::info(
        "SCRATCH_CLEANUP",
        &[("dir", &scratch_dir.display().to_string())],
    );
    let entries = match fs::read_dir(scratch_dir) {
        Ok(entries) => entries,
        Err(e) => {
            Logger::warn("SCRATCH_CLEANUP_FAILED", &[("reason", &e.to_string())]);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() {
            if let Err(e) = fs::remove_file(&path) {
                Logger::warn(
                    "SCRATCH_CLEANUP_FAILED",
                    &[
                        ("path", &path.display().to_string()),
                        ("reason", &e.to_string()),
                    ],
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn write_fixture_tables(dir: &Path) {
        write_file(
            dir,
            "MASTER.txt",
            "N-NUMBER,ENG MFR MDL,MFR MDL CODE\n12345,E1,A1\n",
        );
        write_file(dir, "ENGINE.txt", "CODE,MODEL\nE1,Turbo\n");
        write_file(dir, "ACFTREF.txt", "CODE,MODEL\nA1,Cessna\n");
    }

    fn config_for(dir: &TempDir, cleanup: bool) -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.scratch_dir = dir.path().to_path_buf();
        config.cleanup = cleanup;
        config
    }

    fn write_bundle(config: &ServiceConfig) {
        let file = fs::File::create(config.archive_path()).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, contents) in [
            (
                "MASTER.txt",
                "N-NUMBER,ENG MFR MDL,MFR MDL CODE\n12345,E1,A1\n",
            ),
            ("ENGINE.txt", "CODE,MODEL\nE1,Turbo\n"),
            ("ACFTREF.txt", "CODE,MODEL\nA1,Cessna\n"),
        ] {
            writer
                .start_file(name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_run_etl_merges_fixture_tables() {
        let dir = TempDir::new().unwrap();
        write_fixture_tables(dir.path());

        let records = run_etl(dir.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("n-number"), Some(&json!("N12345")));
        assert_eq!(records[0].get("eng_model"), Some(&json!("Turbo")));
        assert_eq!(records[0].get("acft_model"), Some(&json!("Cessna")));
    }

    #[test]
    fn test_run_etl_fails_without_reference_file() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "MASTER.txt",
            "N-NUMBER,ENG MFR MDL,MFR MDL CODE\n12345,E1,A1\n",
        );

        let err = run_etl(dir.path()).unwrap_err();
        assert!(matches!(err, RunError::Parse(_)));
    }

    #[tokio::test]
    async fn test_run_from_archive_publishes() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, false);
        write_bundle(&config);

        let store = Arc::new(MemoryStore::new());
        let runner = PipelineRunner::new(config.clone(), store.clone());

        let report = runner.run_from_archive().await.unwrap();

        assert_eq!(report.records, 1);
        assert_eq!(store.count(&config.collection).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_removes_scratch_files() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, true);
        write_bundle(&config);

        let store = Arc::new(MemoryStore::new());
        let runner = PipelineRunner::new(config.clone(), store);

        runner.run_from_archive().await.unwrap();

        let remaining: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_failed_run_leaves_live_dataset() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, false);
        // No bundle on disk: extraction fails.

        let store = Arc::new(MemoryStore::new());
        let mut seeded = crate::normalizer::Row::new();
        seeded.insert("n-number".to_string(), json!("N777"));
        store.insert(&config.collection, seeded).unwrap();

        let runner = PipelineRunner::new(config.clone(), store.clone());
        let err = runner.run_from_archive().await.unwrap_err();

        assert!(matches!(err, RunError::Fetch(_)));
        assert_eq!(store.count(&config.collection).unwrap(), 1);
    }
}
