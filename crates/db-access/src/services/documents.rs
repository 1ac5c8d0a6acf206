use super::backend;
use crate::deadline::{with_deadline, Deadlines};
use crate::error::StoreError;
use crate::id::DocumentId;
use crate::models::{CollectionEntries, CreatedDocument, DeletedDocument, UpdatedDocument};
use crate::names::check_names;
use crate::pagination::{has_more, Page};
use crate::payload::{sanitize_document, validate_document_data};
use crate::store::DocumentStore;
use panel_core::{Document, ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{debug, info};

const DOCUMENT_NOT_FOUND: &str = "document not found";

fn parse_id(raw: &str) -> ServiceResult<DocumentId> {
    if raw.is_empty() {
        return Err(ServiceError::validation("document ID cannot be empty"));
    }
    Ok(DocumentId::parse(raw))
}

/// Single-document CRUD and paginated reads.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    deadlines: Deadlines,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>, deadlines: Deadlines) -> Self {
        Self { store, deadlines }
    }

    /// Insert a document after dropping null values and empty keys.
    pub async fn create(
        &self,
        db: &str,
        collection: &str,
        data: Document,
    ) -> ServiceResult<CreatedDocument> {
        check_names(db, collection)?;
        let document = sanitize_document(data);
        validate_document_data(&document)?;
        info!("Creating document in '{}.{}'", db, collection);

        let document_id = with_deadline(
            "create_document",
            self.deadlines.short,
            self.store.insert_one(db, collection, document),
        )
        .await
        .map_err(backend("failed to create document"))?;

        debug!("Created document {:?} in '{}.{}'", document_id, db, collection);
        Ok(CreatedDocument {
            database: db.to_string(),
            collection: collection.to_string(),
            document_id,
        })
    }

    /// One page of documents plus the collection total.
    pub async fn entries(
        &self,
        db: &str,
        collection: &str,
        page: Page,
    ) -> ServiceResult<CollectionEntries> {
        check_names(db, collection)?;
        info!(
            "Reading '{}.{}' (limit {}, skip {})",
            db, collection, page.limit, page.skip
        );

        let store = &self.store;
        let (total_count, data) = with_deadline("collection_entries", self.deadlines.medium, async {
            let total = store.count_documents(db, collection).await?;
            let data = store
                .find(db, collection, Some(page.limit), page.skip)
                .await?;
            Ok::<_, StoreError>((total, data))
        })
        .await
        .map_err(backend("failed to read collection"))?;

        Ok(CollectionEntries {
            database: db.to_string(),
            collection: collection.to_string(),
            count: data.len(),
            has_more: has_more(page.skip, data.len(), total_count),
            data,
            total_count,
            limit: page.limit,
            skip: page.skip,
        })
    }

    pub async fn get(&self, db: &str, collection: &str, id: &str) -> ServiceResult<Document> {
        check_names(db, collection)?;
        let id = parse_id(id)?;

        with_deadline(
            "get_document",
            self.deadlines.short,
            self.store.find_one(db, collection, &id),
        )
        .await
        .map_err(backend("failed to get document"))?
        .ok_or_else(|| ServiceError::not_found(DOCUMENT_NOT_FOUND))
    }

    /// Set the given fields on one document. `_id` is immutable and is
    /// dropped from the payload.
    pub async fn update(
        &self,
        db: &str,
        collection: &str,
        id: &str,
        data: Document,
    ) -> ServiceResult<UpdatedDocument> {
        check_names(db, collection)?;
        let document_id = parse_id(id)?;
        let mut fields = sanitize_document(data);
        fields.remove("_id");
        validate_document_data(&fields)?;
        info!("Updating document {} in '{}.{}'", document_id, db, collection);

        let counts = with_deadline(
            "update_document",
            self.deadlines.short,
            self.store.update_one(db, collection, &document_id, fields),
        )
        .await
        .map_err(backend("failed to update document"))?;

        if counts.matched == 0 {
            return Err(ServiceError::not_found(DOCUMENT_NOT_FOUND));
        }

        Ok(UpdatedDocument {
            database: db.to_string(),
            collection: collection.to_string(),
            document_id: id.to_string(),
            matched_count: counts.matched,
            modified_count: counts.modified,
        })
    }

    pub async fn delete(
        &self,
        db: &str,
        collection: &str,
        id: &str,
    ) -> ServiceResult<DeletedDocument> {
        check_names(db, collection)?;
        let document_id = parse_id(id)?;
        info!("Deleting document {} from '{}.{}'", document_id, db, collection);

        let deleted_count = with_deadline(
            "delete_document",
            self.deadlines.short,
            self.store.delete_one(db, collection, &document_id),
        )
        .await
        .map_err(backend("failed to delete document"))?;

        if deleted_count == 0 {
            return Err(ServiceError::not_found(DOCUMENT_NOT_FOUND));
        }

        Ok(DeletedDocument {
            database: db.to_string(),
            collection: collection.to_string(),
            document_id: id.to_string(),
            deleted_count,
        })
    }
}
