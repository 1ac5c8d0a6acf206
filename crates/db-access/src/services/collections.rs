use super::backend;
use crate::deadline::{with_deadline, with_deadline_at, Deadlines};
use crate::error::StoreError;
use crate::models::{
    AnalysisReport, AnalysisRequest, AnalysisResult, CollectionInfo, CollectionList,
    FieldRemoval, SampleData, SchemaDetection,
};
use crate::names::{check_db_name, check_names, is_valid_collection_name};
use crate::pagination::{normalize_limit, DEFAULT_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT};
use crate::store::DocumentStore;
use panel_core::{Document, ServiceError, ServiceResult};
use schema_inference::{analyze, SchemaSummary};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Documents sampled for schema detection.
pub const SCHEMA_SAMPLE_SIZE: i64 = 100;

/// Documents sampled per collection in a multi-collection analysis.
pub const ANALYSIS_SAMPLE_SIZE: i64 = 50;

const EMPTY_COLLECTION: &str = "Collection is empty";
const SCHEMA_DETECTED: &str = "Schema detected successfully";

enum EnhancedScan {
    MissingDatabase,
    MissingCollection,
    Empty,
    Sampled(Vec<Document>),
}

/// Collection-level operations: listing, sampling and schema detection.
#[derive(Clone)]
pub struct CollectionService {
    store: Arc<dyn DocumentStore>,
    deadlines: Deadlines,
}

impl CollectionService {
    pub fn new(store: Arc<dyn DocumentStore>, deadlines: Deadlines) -> Self {
        Self { store, deadlines }
    }

    /// Valid collections of `db` with their document counts.
    ///
    /// A failed count is reported as 0 rather than failing the listing.
    pub async fn list_collections(&self, db: &str) -> ServiceResult<CollectionList> {
        check_db_name(db)?;
        info!("Listing collections in database '{}'", db);

        let store = &self.store;
        let collections = with_deadline("list_collections", self.deadlines.short, async {
            let names = store.list_collection_names(db).await?;
            let mut collections = Vec::with_capacity(names.len());
            for name in names {
                if !is_valid_collection_name(&name) {
                    continue;
                }
                let document_count = match store.count_documents(db, &name).await {
                    Ok(count) => count,
                    Err(e) => {
                        warn!("Failed to count documents in '{}.{}': {}", db, name, e);
                        0
                    }
                };
                collections.push(CollectionInfo {
                    name,
                    document_count,
                });
            }
            Ok::<_, StoreError>(collections)
        })
        .await
        .map_err(backend("failed to list collections"))?;

        debug!("Found {} collections in '{}'", collections.len(), db);
        Ok(CollectionList {
            database: db.to_string(),
            total: collections.len(),
            collections,
        })
    }

    fn detection(
        &self,
        message: impl Into<String>,
        db: &str,
        collection: &str,
        schema: SchemaSummary,
        sample_count: usize,
    ) -> SchemaDetection {
        SchemaDetection {
            message: message.into(),
            database: db.to_string(),
            collection: collection.to_string(),
            total_fields: schema.len(),
            schema,
            sample_count,
        }
    }

    /// Infer a plain schema from up to 100 documents.
    pub async fn detect_schema(&self, db: &str, collection: &str) -> ServiceResult<SchemaDetection> {
        check_names(db, collection)?;
        info!("Detecting schema of '{}.{}'", db, collection);

        let documents = with_deadline(
            "detect_schema",
            self.deadlines.medium,
            self.store
                .find(db, collection, Some(SCHEMA_SAMPLE_SIZE), 0),
        )
        .await
        .map_err(backend("failed to query collection"))?;

        if documents.is_empty() {
            return Ok(self.detection(EMPTY_COLLECTION, db, collection, SchemaSummary::new(), 0));
        }

        let schema = analyze(&documents, false);
        Ok(self.detection(SCHEMA_DETECTED, db, collection, schema, documents.len()))
    }

    /// Infer a schema with per-field statistics.
    ///
    /// The database and collection must exist.
    pub async fn detect_schema_enhanced(
        &self,
        db: &str,
        collection: &str,
    ) -> ServiceResult<SchemaDetection> {
        check_names(db, collection)?;
        info!("Detecting enhanced schema of '{}.{}'", db, collection);

        let store = &self.store;
        let scan = with_deadline("detect_schema_enhanced", self.deadlines.medium, async {
            if !store.list_database_names().await?.iter().any(|n| n == db) {
                return Ok::<_, StoreError>(EnhancedScan::MissingDatabase);
            }
            if !store
                .list_collection_names(db)
                .await?
                .iter()
                .any(|n| n == collection)
            {
                return Ok(EnhancedScan::MissingCollection);
            }
            if store.count_documents(db, collection).await? == 0 {
                return Ok(EnhancedScan::Empty);
            }
            let documents = store
                .find(db, collection, Some(SCHEMA_SAMPLE_SIZE), 0)
                .await?;
            Ok(EnhancedScan::Sampled(documents))
        })
        .await
        .map_err(backend("failed to scan collection"))?;

        match scan {
            EnhancedScan::MissingDatabase => Err(ServiceError::not_found(format!(
                "Database '{db}' not found"
            ))),
            EnhancedScan::MissingCollection => Err(ServiceError::not_found(format!(
                "Collection '{collection}' not found in database '{db}'"
            ))),
            EnhancedScan::Empty => Ok(self.detection(
                format!("Collection '{collection}' exists but is empty"),
                db,
                collection,
                SchemaSummary::new(),
                0,
            )),
            EnhancedScan::Sampled(documents) => {
                let schema = analyze(&documents, true);
                Ok(self.detection(SCHEMA_DETECTED, db, collection, schema, documents.len()))
            }
        }
    }

    /// Up to `limit` documents; out-of-range limits become 10.
    pub async fn sample_data(
        &self,
        db: &str,
        collection: &str,
        limit: i64,
    ) -> ServiceResult<SampleData> {
        check_names(db, collection)?;
        let limit = normalize_limit(limit, DEFAULT_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT);
        info!("Sampling {} documents from '{}.{}'", limit, db, collection);

        let data = with_deadline(
            "sample_data",
            self.deadlines.short,
            self.store.find(db, collection, Some(limit), 0),
        )
        .await
        .map_err(backend("failed to query collection"))?;

        Ok(SampleData {
            database: db.to_string(),
            collection: collection.to_string(),
            count: data.len(),
            data,
        })
    }

    /// Analyze several collections in input order.
    ///
    /// Per-collection failures, including running past the shared long
    /// deadline, are recorded in that collection's result; only an invalid
    /// request fails the call.
    pub async fn analyze_collections(
        &self,
        request: &AnalysisRequest,
    ) -> ServiceResult<AnalysisReport> {
        let db = request.db_name.as_str();
        check_db_name(db)?;
        if request.collections.is_empty() {
            return Err(ServiceError::validation(
                "no collections specified for analysis",
            ));
        }
        info!(
            "Analyzing {} collections in '{}'",
            request.collections.len(),
            db
        );

        // One budget for the whole request; a collection reached after it
        // runs out records the timeout as its own error.
        let budget = self.deadlines.long;
        let deadline = Instant::now() + budget;
        let mut results = BTreeMap::new();
        for name in &request.collections {
            let result = if !is_valid_collection_name(name) {
                AnalysisResult {
                    error: Some(format!("Invalid collection name: {name}")),
                    ..Default::default()
                }
            } else {
                let sampled = with_deadline_at(
                    "analyze_collections",
                    deadline,
                    budget,
                    self.store.find(db, name, Some(ANALYSIS_SAMPLE_SIZE), 0),
                )
                .await;
                match sampled {
                    Err(e) => {
                        warn!("Analysis of '{}.{}' failed: {}", db, name, e);
                        AnalysisResult {
                            error: Some(format!("Failed to query collection: {e}")),
                            ..Default::default()
                        }
                    }
                    Ok(documents) if documents.is_empty() => AnalysisResult {
                        schema: Some(SchemaSummary::new()),
                        message: Some(EMPTY_COLLECTION.to_string()),
                        ..Default::default()
                    },
                    Ok(documents) => {
                        let schema = analyze(&documents, false);
                        AnalysisResult {
                            sample_count: documents.len(),
                            field_count: schema.len(),
                            schema: Some(schema),
                            ..Default::default()
                        }
                    }
                }
            };
            results.insert(name.clone(), result);
        }

        Ok(AnalysisReport {
            database: db.to_string(),
            results,
        })
    }

    /// Remove a field from every document of a collection.
    pub async fn remove_field(
        &self,
        db: &str,
        collection: &str,
        field: &str,
    ) -> ServiceResult<FieldRemoval> {
        check_names(db, collection)?;
        if field.is_empty() {
            return Err(ServiceError::validation("field name is required"));
        }
        if field == "_id" {
            return Err(ServiceError::validation("cannot remove the _id field"));
        }
        info!("Removing field '{}' from '{}.{}'", field, db, collection);

        let modified_count = with_deadline(
            "remove_field",
            self.deadlines.long,
            self.store.unset_field(db, collection, field),
        )
        .await
        .map_err(backend("failed to remove field from documents"))?;

        Ok(FieldRemoval {
            database: db.to_string(),
            collection: collection.to_string(),
            field: field.to_string(),
            modified_count,
        })
    }
}
