//! Document store abstraction.
//!
//! The gateway services only talk to a [`DocumentStore`]. [`MongoStore`]
//! backs it with a MongoDB deployment; [`MemoryStore`] keeps everything in
//! process and is used for tests and local runs without a database.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::{shared_client, MongoStore};

use crate::error::StoreError;
use crate::id::DocumentId;
use async_trait::async_trait;
use panel_core::{DocValue, Document};

/// Counts reported by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

/// Find/insert/update/delete/count over named databases and collections.
///
/// Implementations perform no name validation and apply no deadlines; the
/// services do both before and around every call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_database_names(&self) -> Result<Vec<String>, StoreError>;

    async fn list_collection_names(&self, db: &str) -> Result<Vec<String>, StoreError>;

    async fn count_documents(&self, db: &str, collection: &str) -> Result<u64, StoreError>;

    /// Documents in natural order; `limit` of `None` reads everything.
    async fn find(
        &self,
        db: &str,
        collection: &str,
        limit: Option<i64>,
        skip: u64,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a document, returning its `_id` (assigned when absent).
    async fn insert_one(
        &self,
        db: &str,
        collection: &str,
        document: Document,
    ) -> Result<DocValue, StoreError>;

    /// Set the given fields on the matching document.
    async fn update_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
        fields: Document,
    ) -> Result<UpdateCounts, StoreError>;

    /// Returns the number of deleted documents.
    async fn delete_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
    ) -> Result<u64, StoreError>;

    /// Remove `field` from every document that has it; returns modified count.
    async fn unset_field(&self, db: &str, collection: &str, field: &str)
        -> Result<u64, StoreError>;

    async fn ping(&self, db: &str) -> Result<(), StoreError>;
}
