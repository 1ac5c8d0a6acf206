//! Mock data and schema catalog routes.

use super::db_access::ping;
use crate::response::{ApiError, ApiResult, Context, Reply};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use mockdata_service::{
    BulkItem, BulkOutcome, FieldTypeInfo, GenerateRequest, GeneratedData, MockdataService,
    PresetDefinition, PresetSummary, SampleData, SchemaComparison, SchemaDetails, SchemaService,
    SchemaStatistics, DEFAULT_PRESET_COUNT,
};
use panel_core::{Schema, ServiceError, ServiceResult, StructureReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct MockdataState {
    pub mockdata: MockdataService,
    pub schemas: SchemaService,
}

impl MockdataState {
    pub fn new(mockdata: MockdataService) -> Self {
        Self {
            mockdata,
            schemas: SchemaService::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    #[serde(default)]
    pub schemas: Vec<BulkItem>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub schema1: Schema,
    pub schema2: Schema,
}

#[derive(Debug, Serialize)]
struct CustomValidation {
    valid: bool,
    message: &'static str,
    statistics: SchemaStatistics,
}

#[derive(Debug, Serialize)]
struct PresetList {
    schemas: BTreeMap<String, PresetSummary>,
    count: usize,
}

pub fn router(state: MockdataState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/v1/mockdata/generate", post(generate))
        .route("/v1/mockdata/generate/:schema_name", post(generate_preset))
        .route("/v1/mockdata/generate-bulk", post(generate_bulk))
        .route("/v1/mockdata/validate", post(validate_custom))
        .route("/v1/mockdata/sample/:schema_name", get(sample))
        .route("/v1/schemas", get(list_presets))
        .route("/v1/schemas/types", get(field_types))
        .route("/v1/schemas/validate", post(validate_structure))
        .route("/v1/schemas/compare", post(compare))
        .route("/v1/schemas/:name", get(preset_details))
        .route("/v1/schemas/:name/definition", get(preset_definition))
        .with_state(state)
}

/// Run CPU-bound generation off the async workers.
async fn blocking<T, F>(task: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ServiceError::backend(format!("generation task failed: {e}")))?
}

fn generation_failed(err: ServiceError) -> ApiError {
    let message = match &err {
        ServiceError::NotFound(_) => "Schema not found",
        _ => "Failed to generate data",
    };
    ApiError::from(err).context(message)
}

/// Count from the query string; missing, unparsable or non-positive values
/// fall back to the default.
fn preset_count(params: &HashMap<String, String>) -> i64 {
    params
        .get("count")
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_PRESET_COUNT)
}

async fn generate(
    State(state): State<MockdataState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<GeneratedData> {
    let Json(request) = body?;
    let service = state.mockdata.clone();
    let generated = blocking(move || service.generate(&request))
        .await
        .map_err(generation_failed)?;
    Ok(Reply::ok("Mock data generated successfully", generated))
}

async fn generate_preset(
    State(state): State<MockdataState>,
    Path(schema_name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<GeneratedData> {
    let count = preset_count(&params);
    let service = state.mockdata.clone();
    let generated = blocking(move || service.generate_preset(&schema_name, count))
        .await
        .map_err(generation_failed)?;
    Ok(Reply::ok("Mock data generated successfully", generated))
}

async fn generate_bulk(
    State(state): State<MockdataState>,
    body: Result<Json<BulkRequest>, JsonRejection>,
) -> ApiResult<BTreeMap<String, BulkOutcome>> {
    let Json(request) = body?;
    let service = state.mockdata.clone();
    let results = blocking(move || service.bulk_generate(&request.schemas))
        .await
        .context("Invalid bulk request")?;
    Ok(Reply::ok("Bulk data generation completed", results))
}

async fn validate_custom(
    State(state): State<MockdataState>,
    body: Result<Json<Schema>, JsonRejection>,
) -> ApiResult<CustomValidation> {
    let Json(schema) = body?;
    let statistics = state
        .mockdata
        .validate_custom(&schema)
        .context("Schema validation failed")?;
    Ok(Reply::ok(
        "Schema validation successful",
        CustomValidation {
            valid: true,
            message: "Schema is valid",
            statistics,
        },
    ))
}

async fn sample(
    State(state): State<MockdataState>,
    Path(schema_name): Path<String>,
) -> ApiResult<SampleData> {
    let service = state.mockdata.clone();
    let sample = blocking(move || service.sample(&schema_name))
        .await
        .map_err(generation_failed)?;
    Ok(Reply::ok("Sample data generated successfully", sample))
}

async fn list_presets(State(state): State<MockdataState>) -> ApiResult<PresetList> {
    let schemas = state.schemas.list_presets();
    Ok(Reply::ok(
        "Predefined schemas retrieved successfully",
        PresetList {
            count: schemas.len(),
            schemas,
        },
    ))
}

async fn preset_details(
    State(state): State<MockdataState>,
    Path(name): Path<String>,
) -> ApiResult<SchemaDetails> {
    let details = state
        .schemas
        .preset_details(&name)
        .context("Schema not found")?;
    Ok(Reply::ok("Schema details retrieved successfully", details))
}

async fn preset_definition(
    State(state): State<MockdataState>,
    Path(name): Path<String>,
) -> ApiResult<PresetDefinition> {
    let definition = state
        .schemas
        .preset_definition(&name)
        .context("Schema not found")?;
    Ok(Reply::ok("Schema definition retrieved successfully", definition))
}

async fn validate_structure(
    State(state): State<MockdataState>,
    body: Result<Json<Schema>, JsonRejection>,
) -> ApiResult<StructureReport> {
    let Json(schema) = body?;
    let report = state.schemas.validate_structure(&schema);
    if !report.valid {
        let summary = report.errors.join("; ");
        return Err(ApiError::from(ServiceError::validation(summary))
            .context("Schema validation failed")
            .with_data(&report));
    }
    Ok(Reply::ok("Schema validation successful", report))
}

async fn compare(
    State(state): State<MockdataState>,
    body: Result<Json<CompareRequest>, JsonRejection>,
) -> ApiResult<SchemaComparison> {
    let Json(request) = body?;
    let comparison = state.schemas.compare(&request.schema1, &request.schema2);
    Ok(Reply::ok("Schema comparison completed", comparison))
}

async fn field_types(
    State(state): State<MockdataState>,
) -> ApiResult<BTreeMap<String, FieldTypeInfo>> {
    Ok(Reply::ok(
        "Field types retrieved successfully",
        state.schemas.field_types(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(count: &str) -> HashMap<String, String> {
        HashMap::from([("count".to_string(), count.to_string())])
    }

    #[test]
    fn test_preset_count_fallback() {
        assert_eq!(preset_count(&HashMap::new()), 10);
        assert_eq!(preset_count(&params("abc")), 10);
        assert_eq!(preset_count(&params("0")), 10);
        assert_eq!(preset_count(&params("-4")), 10);
        assert_eq!(preset_count(&params("25")), 25);
    }
}
