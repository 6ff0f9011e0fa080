//! In-process collection store
//!
//! Named collections held in memory behind a single `RwLock`. Reads
//! take the shared lock; structural changes (insert, drop, rename)
//! take the exclusive lock. Rename is the atomic promotion primitive:
//! a reader can never observe the public name unbound or half-filled.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::collection::{CollectionStore, Document};
use super::errors::{StoreError, StoreResult};

/// In-memory document store.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Names of the collections currently held.
    pub fn collection_names(&self) -> StoreResult<Vec<String>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::lock_poisoned())?;
        Ok(collections.keys().cloned().collect())
    }

    /// Snapshot of a collection's documents in insertion order.
    /// Empty if the collection does not exist.
    pub fn documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::lock_poisoned())?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionStore for MemoryStore {
    fn insert(&self, collection: &str, document: Document) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::lock_poisoned())?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    fn insert_many(&self, collection: &str, documents: Vec<Document>) -> StoreResult<usize> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::lock_poisoned())?;
        let rows = collections.entry(collection.to_string()).or_default();
        let inserted = documents.len();
        rows.extend(documents);
        Ok(inserted)
    }

    fn drop_collection(&self, collection: &str) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::lock_poisoned())?;
        collections.remove(collection);
        Ok(())
    }

    fn rename_collection(&self, from: &str, to: &str) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::lock_poisoned())?;
        let rows = collections
            .remove(from)
            .ok_or_else(|| StoreError::unknown_collection(from))?;
        // Replaces any previous target under the same exclusive lock.
        collections.insert(to.to_string(), rows);
        Ok(())
    }

    fn find_eq(&self, collection: &str, field: &str, value: &Value) -> StoreResult<Vec<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::lock_poisoned())?;
        let Some(rows) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .filter(|row| row.get(field) == Some(value))
            .cloned()
            .collect())
    }

    fn count(&self, collection: &str) -> StoreResult<usize> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::lock_poisoned())?;
        Ok(collections.get(collection).map_or(0, Vec::len))
    }

    fn collection_exists(&self, collection: &str) -> StoreResult<bool> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::lock_poisoned())?;
        Ok(collections.contains_key(collection))
    }
}
