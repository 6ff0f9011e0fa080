//! Collection store interface
//!
//! The pipeline and the read API talk to storage through this trait so
//! the publisher's failure semantics can be exercised against stores
//! that reject writes.

use serde_json::Value;

use super::errors::StoreResult;

/// One stored record: a flat JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Collection-oriented document store.
///
/// Semantics every implementation must uphold:
/// - `insert` into a collection that does not exist creates it.
/// - `drop_collection` of a missing collection is a no-op.
/// - `rename_collection` atomically retargets `to`: the previous
///   contents of `to` (if any) are destroyed and `from` ceases to
///   exist, all within one exclusive critical section.
/// - `find_eq` on a missing collection returns no documents.
pub trait CollectionStore: Send + Sync {
    /// Insert a single document.
    fn insert(&self, collection: &str, document: Document) -> StoreResult<()>;

    /// Insert a batch of documents. Returns the number inserted.
    fn insert_many(&self, collection: &str, documents: Vec<Document>) -> StoreResult<usize>;

    /// Drop a collection and its contents.
    fn drop_collection(&self, collection: &str) -> StoreResult<()>;

    /// Atomically rename `from` to `to`, replacing any previous `to`.
    fn rename_collection(&self, from: &str, to: &str) -> StoreResult<()>;

    /// Return every document whose `field` equals `value`.
    fn find_eq(&self, collection: &str, field: &str, value: &Value) -> StoreResult<Vec<Document>>;

    /// Number of documents in a collection (0 if it does not exist).
    fn count(&self, collection: &str) -> StoreResult<usize>;

    /// Whether the named collection currently exists.
    fn collection_exists(&self, collection: &str) -> StoreResult<bool>;
}
