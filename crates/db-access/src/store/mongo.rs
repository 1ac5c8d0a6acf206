//! MongoDB-backed document store.

use super::{DocumentStore, UpdateCounts};
use crate::error::StoreError;
use crate::id::DocumentId;
use async_trait::async_trait;
use bson::{doc, Bson};
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use mongodb_types::{bson_document_to_document, bson_to_doc_value, document_to_bson};
use panel_core::{DocValue, Document};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Connect and server-selection timeout for new clients.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

static SHARED: OnceCell<MongoStore> = OnceCell::const_new();

/// Process-wide store, connected on first use.
///
/// Concurrent first callers wait on the same initialisation, so exactly one
/// client is created. Later calls return that client and ignore `uri`. A
/// failed initialisation leaves the cell empty and the next call retries.
pub async fn shared_client(uri: &str) -> Result<&'static MongoStore, StoreError> {
    SHARED
        .get_or_try_init(|| async {
            info!("Initialising shared MongoDB client");
            MongoStore::connect(uri).await
        })
        .await
}

/// Document store over a MongoDB client.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Connect and verify the deployment answers a ping.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);
        options.app_name.get_or_insert_with(|| "universal-panel".to_string());

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        debug!("MongoDB client connected");

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn collection(&self, db: &str, collection: &str) -> Collection<bson::Document> {
        self.client.database(db).collection(collection)
    }
}

fn id_filter(id: &DocumentId) -> bson::Document {
    let value = match id {
        DocumentId::ObjectId(hex) => match bson::oid::ObjectId::parse_str(hex) {
            Ok(oid) => Bson::ObjectId(oid),
            Err(_) => Bson::String(hex.clone()),
        },
        DocumentId::Int(n) => Bson::Int64(*n),
        DocumentId::Text(s) => Bson::String(s.clone()),
    };
    doc! { "_id": value }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_database_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.client.list_database_names().await?)
    }

    async fn list_collection_names(&self, db: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.client.database(db).list_collection_names().await?)
    }

    async fn count_documents(&self, db: &str, collection: &str) -> Result<u64, StoreError> {
        Ok(self.collection(db, collection).count_documents(doc! {}).await?)
    }

    async fn find(
        &self,
        db: &str,
        collection: &str,
        limit: Option<i64>,
        skip: u64,
    ) -> Result<Vec<Document>, StoreError> {
        let coll = self.collection(db, collection);
        let mut action = coll.find(doc! {}).skip(skip);
        if let Some(limit) = limit {
            action = action.limit(limit);
        }

        let cursor = action.await?;
        let documents: Vec<bson::Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(bson_document_to_document).collect())
    }

    async fn find_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let found = self
            .collection(db, collection)
            .find_one(id_filter(id))
            .await?;
        Ok(found.map(bson_document_to_document))
    }

    async fn insert_one(
        &self,
        db: &str,
        collection: &str,
        document: Document,
    ) -> Result<DocValue, StoreError> {
        let result = self
            .collection(db, collection)
            .insert_one(document_to_bson(document))
            .await?;
        Ok(bson_to_doc_value(result.inserted_id))
    }

    async fn update_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
        fields: Document,
    ) -> Result<UpdateCounts, StoreError> {
        let update = doc! { "$set": document_to_bson(fields) };
        let result = self
            .collection(db, collection)
            .update_one(id_filter(id), update)
            .await?;
        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(
        &self,
        db: &str,
        collection: &str,
        id: &DocumentId,
    ) -> Result<u64, StoreError> {
        let result = self
            .collection(db, collection)
            .delete_one(id_filter(id))
            .await?;
        Ok(result.deleted_count)
    }

    async fn unset_field(
        &self,
        db: &str,
        collection: &str,
        field: &str,
    ) -> Result<u64, StoreError> {
        let filter = doc! { field: { "$exists": true } };
        let update = doc! { "$unset": { field: "" } };
        let result = self
            .collection(db, collection)
            .update_many(filter, update)
            .await?;
        Ok(result.modified_count)
    }

    async fn ping(&self, db: &str) -> Result<(), StoreError> {
        self.client
            .database(db)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
