//! In-process document store.

use super::{DocumentStore, UpdateCounts};
use crate::error::StoreError;
use crate::id::DocumentId;
use async_trait::async_trait;
use panel_core::{DocValue, Document};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;

type Collections = BTreeMap<String, Vec<Document>>;

/// Document store held in memory.
///
/// Databases and collections spring into existence on first insert, as they
/// do in MongoDB. Documents keep insertion order. An optional latency is
/// applied before every operation, which lets deadline handling be tested.
///
/// Updates never touch a stored `_id`, and `unset_field` follows dotted paths
/// through nested objects. Unlike MongoDB, a changed `_id` in an update is
/// ignored rather than rejected, and numeric path segments are not treated as
/// array positions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    databases: RwLock<BTreeMap<String, Collections>>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a collection.
    pub fn with_documents(mut self, db: &str, collection: &str, documents: Vec<Document>) -> Self {
        self.databases
            .get_mut()
            .entry(db.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
        self
    }

    /// Delay every operation by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn matches_id(document: &Document, id: &DocumentId) -> bool {
    document.get("_id").is_some_and(|value| id.matches(value))
}

/// Remove a dotted `path`, descending through nested objects.
fn remove_path(document: &mut Document, path: &str) -> Option<DocValue> {
    match path.split_once('.') {
        Some((head, rest)) => match document.get_mut(head) {
            Some(DocValue::Object(inner)) => remove_path(inner, rest),
            _ => None,
        },
        None => document.remove(path),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_database_names(&self) -> Result<Vec<String>, StoreError> {
        self.delay().await;
        Ok(self.databases.read().await.keys().cloned().collect())
    }

    async fn list_collection_names(&self, db: &str) -> Result<Vec<String>, StoreError> {
        self.delay().await;
        let databases = self.databases.read().await;
        Ok(databases
            .get(db)
            .map(|collections| collections.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn count_documents(&self, db: &str, collection: &str) -> Result<u64, StoreError> {
        self.delay().await;
        let databases = self.databases.read().await;
        Ok(databases
            .get(db)
            .and_then(|collections| collections.get(collection))
            .map_or(0, |docs| docs.len() as u64))
    }

    async fn find(
        &self,
        db: &str,
        collection: &str,
        limit: Option<i64>,
        skip: u64,
    ) -> Result<Vec<Document>, StoreError> {
        self.delay().await;
        let databases = self.databases.read().await;
        let Some(docs) = databases.get(db).and_then(|c| c.get(collection)) else {
            return Ok(Vec::new());
        };

        let take = limit
            .filter(|l| *l > 0)
            .map_or(usize::MAX, |l| l as usize);
        Ok(docs
            .iter()
            .skip(skip as usize)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        self.delay().await;
        let databases = self.databases.read().await;
        Ok(databases
            .get(db)
            .and_then(|c| c.get(collection))
            .and_then(|docs| docs.iter().find(|d| matches_id(d, id)))
            .cloned())
    }

    async fn insert_one(
        &self,
        db: &str,
        collection: &str,
        mut document: Document,
    ) -> Result<DocValue, StoreError> {
        self.delay().await;
        let id = match document.get("_id") {
            Some(existing) if !existing.is_null() => existing.clone(),
            _ => {
                let generated = DocValue::ObjectId(bson::oid::ObjectId::new().to_hex());
                document.insert("_id".to_string(), generated.clone());
                generated
            }
        };

        let mut databases = self.databases.write().await;
        databases
            .entry(db.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
        fields: Document,
    ) -> Result<UpdateCounts, StoreError> {
        self.delay().await;
        let mut databases = self.databases.write().await;
        let target = databases
            .get_mut(db)
            .and_then(|c| c.get_mut(collection))
            .and_then(|docs| docs.iter_mut().find(|d| matches_id(d, id)));

        let Some(document) = target else {
            return Ok(UpdateCounts::default());
        };

        let mut modified = false;
        for (key, value) in fields {
            if key == "_id" {
                continue;
            }
            if document.get(&key) != Some(&value) {
                document.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateCounts {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
    ) -> Result<u64, StoreError> {
        self.delay().await;
        let mut databases = self.databases.write().await;
        let Some(docs) = databases.get_mut(db).and_then(|c| c.get_mut(collection)) else {
            return Ok(0);
        };

        match docs.iter().position(|d| matches_id(d, id)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn unset_field(
        &self,
        db: &str,
        collection: &str,
        field: &str,
    ) -> Result<u64, StoreError> {
        self.delay().await;
        let mut databases = self.databases.write().await;
        let Some(docs) = databases.get_mut(db).and_then(|c| c.get_mut(collection)) else {
            return Ok(0);
        };

        let removed = docs
            .iter_mut()
            .filter_map(|doc| remove_path(doc, field))
            .count();
        Ok(removed as u64)
    }

    async fn ping(&self, _db: &str) -> Result<(), StoreError> {
        self.delay().await;
        Ok(())
    }
}
