//! Response payloads produced by the gateway services.

use panel_core::{DocValue, Document};
use schema_inference::SchemaSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionInfo {
    pub name: String,
    pub document_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionList {
    pub database: String,
    pub collections: Vec<CollectionInfo>,
    pub total: usize,
}

/// Inferred schema of one collection.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDetection {
    /// Human-readable outcome, used as the response message
    #[serde(skip)]
    pub message: String,
    pub database: String,
    pub collection: String,
    pub schema: SchemaSummary,
    pub sample_count: usize,
    pub total_fields: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleData {
    pub database: String,
    pub collection: String,
    pub data: Vec<Document>,
    pub count: usize,
}

/// Request to analyze several collections of one database.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub db_name: String,
    #[serde(default)]
    pub collections: Vec<String>,
}

/// Per-collection analysis result. Failures are captured in `error`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaSummary>,
    #[serde(skip_serializing_if = "is_zero")]
    pub sample_count: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub field_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub database: String,
    pub results: BTreeMap<String, AnalysisResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseInfo {
    pub database: String,
    pub collections_count: usize,
    pub collections: Vec<String>,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedDocument {
    pub database: String,
    pub collection: String,
    pub document_id: DocValue,
}

/// One page of a collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionEntries {
    pub database: String,
    pub collection: String,
    pub data: Vec<Document>,
    pub count: usize,
    pub total_count: u64,
    pub limit: i64,
    pub skip: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedDocument {
    pub database: String,
    pub collection: String,
    pub document_id: String,
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedDocument {
    pub database: String,
    pub collection: String,
    pub document_id: String,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldRemoval {
    pub database: String,
    pub collection: String,
    pub field: String,
    pub modified_count: u64,
}

impl FieldRemoval {
    pub fn message(&self) -> String {
        format!(
            "Field '{}' removed from {} documents in collection '{}'",
            self.field, self.modified_count, self.collection
        )
    }
}
