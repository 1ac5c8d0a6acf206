//! Document gateway routes.

use crate::response::{ApiResult, Context, Reply};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use db_access::pagination::{parse_limit, DEFAULT_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT};
use db_access::{
    AnalysisReport, AnalysisRequest, CollectionEntries, CollectionList, CreatedDocument,
    DatabaseInfo, DeletedDocument, FieldRemoval, Gateway, Page, SampleData, SchemaDetection,
    UpdatedDocument,
};
use json_types::json_to_document;
use panel_core::{Document, ServiceError};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Body of document create and update requests.
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub data: Value,
}

impl DocumentRequest {
    fn into_document(self) -> Result<Document, ServiceError> {
        json_to_document(self.data).map_err(|_| ServiceError::validation("invalid document data"))
    }
}

#[derive(Debug, Deserialize)]
struct DetectQuery {
    #[serde(default)]
    enhanced: Option<String>,
}

type Params = HashMap<String, String>;

pub fn router(gateway: Gateway) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/", get(service_info))
        .route("/db/:db/info", get(database_info))
        .route("/db/:db/test", get(test_connection))
        .route("/collections/:db", get(list_collections))
        .route("/detect-schema/:db/:collection", get(detect_schema))
        .route("/sample-data/:db/:collection", get(sample_data))
        .route("/analyze-documents", post(analyze_documents))
        .route("/entry/:db/:collection", post(create_entry))
        .route("/entries/:db/:collection", get(collection_entries))
        .route(
            "/entry/:db/:collection/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/field/:db/:collection/:field", delete(remove_field))
        .with_state(gateway)
}

pub(crate) async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "DB Access Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "MongoDB database access and schema detection service",
        "endpoints": {
            "health": "GET /ping",
            "database": {
                "info": "GET /db/:db/info",
                "test": "GET /db/:db/test",
            },
            "collections": {
                "list": "GET /collections/:db",
                "detect_schema": "GET /detect-schema/:db/:collection",
                "sample_data": "GET /sample-data/:db/:collection",
                "analyze_docs": "POST /analyze-documents",
                "remove_field": "DELETE /field/:db/:collection/:field",
            },
            "documents": {
                "create": "POST /entry/:db/:collection",
                "read": "GET /entries/:db/:collection",
                "read_one": "GET /entry/:db/:collection/:id",
                "update": "PUT /entry/:db/:collection/:id",
                "delete": "DELETE /entry/:db/:collection/:id",
            },
        },
    }))
}

async fn database_info(
    State(gateway): State<Gateway>,
    Path(db): Path<String>,
) -> ApiResult<DatabaseInfo> {
    let info = gateway.databases.database_info(&db).await?;
    Ok(Reply::ok("Database information retrieved successfully", info))
}

async fn test_connection(
    State(gateway): State<Gateway>,
    Path(db): Path<String>,
) -> ApiResult<Value> {
    gateway.databases.test_connection(&db).await?;
    Ok(Reply::ok(
        "Database connection successful",
        json!({ "database": db, "status": "connected" }),
    ))
}

async fn list_collections(
    State(gateway): State<Gateway>,
    Path(db): Path<String>,
) -> ApiResult<CollectionList> {
    let list = gateway.collections.list_collections(&db).await?;
    Ok(Reply::ok("Collections listed successfully", list))
}

async fn detect_schema(
    State(gateway): State<Gateway>,
    Path((db, collection)): Path<(String, String)>,
    Query(query): Query<DetectQuery>,
) -> ApiResult<SchemaDetection> {
    let detection = if query.enhanced.as_deref() == Some("true") {
        gateway
            .collections
            .detect_schema_enhanced(&db, &collection)
            .await?
    } else {
        gateway.collections.detect_schema(&db, &collection).await?
    };
    Ok(Reply::ok(detection.message.clone(), detection))
}

async fn sample_data(
    State(gateway): State<Gateway>,
    Path((db, collection)): Path<(String, String)>,
    Query(params): Query<Params>,
) -> ApiResult<SampleData> {
    let limit = parse_limit(
        params.get("limit").map(String::as_str),
        DEFAULT_SAMPLE_LIMIT,
        MAX_SAMPLE_LIMIT,
    );
    let sample = gateway
        .collections
        .sample_data(&db, &collection, limit)
        .await?;
    Ok(Reply::ok("Sample data retrieved successfully", sample))
}

async fn analyze_documents(
    State(gateway): State<Gateway>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> ApiResult<AnalysisReport> {
    let Json(request) = body?;
    let report = gateway.collections.analyze_collections(&request).await?;
    Ok(Reply::ok("Document analysis completed", report))
}

async fn create_entry(
    State(gateway): State<Gateway>,
    Path((db, collection)): Path<(String, String)>,
    body: Result<Json<DocumentRequest>, JsonRejection>,
) -> ApiResult<CreatedDocument> {
    let Json(request) = body?;
    let created = gateway
        .documents
        .create(&db, &collection, request.into_document()?)
        .await?;
    Ok(Reply::created("Document created successfully", created))
}

async fn collection_entries(
    State(gateway): State<Gateway>,
    Path((db, collection)): Path<(String, String)>,
    Query(params): Query<Params>,
) -> ApiResult<CollectionEntries> {
    let page = Page::from_query(
        params.get("limit").map(String::as_str),
        params.get("skip").map(String::as_str),
    );
    let entries = gateway.documents.entries(&db, &collection, page).await?;
    Ok(Reply::ok("Entries retrieved successfully", entries))
}

async fn get_entry(
    State(gateway): State<Gateway>,
    Path((db, collection, id)): Path<(String, String, String)>,
) -> ApiResult<Document> {
    let document = gateway
        .documents
        .get(&db, &collection, &id)
        .await
        .context("Document retrieval failed")?;
    Ok(Reply::ok("Document retrieved successfully", document))
}

async fn update_entry(
    State(gateway): State<Gateway>,
    Path((db, collection, id)): Path<(String, String, String)>,
    body: Result<Json<DocumentRequest>, JsonRejection>,
) -> ApiResult<UpdatedDocument> {
    let Json(request) = body?;
    let updated = gateway
        .documents
        .update(&db, &collection, &id, request.into_document()?)
        .await
        .context("Document update failed")?;
    Ok(Reply::ok("Document updated successfully", updated))
}

async fn delete_entry(
    State(gateway): State<Gateway>,
    Path((db, collection, id)): Path<(String, String, String)>,
) -> ApiResult<DeletedDocument> {
    let deleted = gateway
        .documents
        .delete(&db, &collection, &id)
        .await
        .context("Document deletion failed")?;
    Ok(Reply::ok("Document deleted successfully", deleted))
}

async fn remove_field(
    State(gateway): State<Gateway>,
    Path((db, collection, field)): Path<(String, String, String)>,
) -> ApiResult<FieldRemoval> {
    let removal = gateway
        .collections
        .remove_field(&db, &collection, &field)
        .await?;
    let message = removal.message();
    Ok(Reply::ok(message, removal))
}
