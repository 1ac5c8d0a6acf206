//! Route-level tests driving the routers with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use db_access::{Deadlines, Gateway, MemoryStore};
use mockdata_service::MockdataService;
use panel_api::{db_access_router, mockdata_router, with_layers, MockdataState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn gateway() -> Gateway {
    Gateway::new(Arc::new(MemoryStore::new()), Deadlines::default())
}

fn mockdata() -> Router {
    mockdata_router(MockdataState::new(MockdataService::new().with_seed(42)))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_ping() {
    let (status, body) = send(db_access_router(gateway()), "GET", "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "pong"}));
}

#[tokio::test]
async fn test_document_lifecycle() {
    let app = db_access_router(gateway());

    let (status, created) = send(
        app.clone(),
        "POST",
        "/entry/app/users",
        Some(json!({"data": {"name": "Ada", "age": 36, "nick": null}})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["code"], 0);
    let id = created["data"]["document_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let (status, fetched) = send(app.clone(), "GET", &format!("/entry/app/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "Ada");
    assert!(fetched["data"].get("nick").is_none());

    let (status, updated) = send(
        app.clone(),
        "PUT",
        &format!("/entry/app/users/{id}"),
        Some(json!({"data": {"age": 37}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["modified_count"], 1);

    let (status, page) = send(app.clone(), "GET", "/entries/app/users?limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"]["total_count"], 1);
    assert_eq!(page["data"]["has_more"], false);
    assert_eq!(page["data"]["data"][0]["age"], 37);

    let (status, _) = send(app.clone(), "DELETE", &format!("/entry/app/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, missing) = send(app, "GET", &format!("/entry/app/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["success"], false);
    assert_eq!(missing["error"], "document not found");
    assert_eq!(missing["code"], 1);
}

#[tokio::test]
async fn test_invalid_names_are_bad_requests() {
    let (status, body) = send(
        db_access_router(gateway()),
        "GET",
        "/detect-schema/app/system.users",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid collection name: system.users");
}

#[tokio::test]
async fn test_malformed_body_is_a_bad_request() {
    let app = db_access_router(gateway());
    let request = Request::builder()
        .method("POST")
        .uri("/entry/app/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_enhanced_detection_of_missing_database() {
    let (status, body) = send(
        db_access_router(gateway()),
        "GET",
        "/detect-schema/ghost/users?enhanced=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Database 'ghost' not found");
}

#[tokio::test]
async fn test_generate_preset_with_bad_count_uses_default() {
    let (status, body) = send(
        mockdata(),
        "POST",
        "/v1/mockdata/generate/user?count=zero",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 10);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_generate_unknown_preset() {
    let (status, body) = send(mockdata(), "POST", "/v1/mockdata/generate/dragon", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Schema not found");
}

#[tokio::test]
async fn test_all_null_update_is_a_bad_request() {
    let app = db_access_router(gateway());
    let (_, created) = send(
        app.clone(),
        "POST",
        "/entry/app/users",
        Some(json!({"data": {"name": "Ada"}})),
    )
    .await;
    let id = created["data"]["document_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app.clone(),
        "PUT",
        &format!("/entry/app/users/{id}"),
        Some(json!({"data": {"a": null}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid document data");

    let (status, _) = send(app, "POST", "/entry/app/users", Some(json!({"data": {"a": null}}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_array_is_rejected_before_generation() {
    let schema = json!({
        "name": "Big",
        "fields": [
            {"name": "xs", "type": "array", "required": true, "array_type": "bool", "array_length": 1_000_000_000_000i64}
        ]
    });

    let (status, body) = send(
        mockdata(),
        "POST",
        "/v1/mockdata/generate",
        Some(json!({"schema": schema, "count": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "field 'xs': array_length cannot exceed 1000");
}

#[tokio::test]
async fn test_generate_custom_schema() {
    let schema = json!({
        "name": "Ticket",
        "fields": [
            {"name": "id", "type": "uuid", "required": true},
            {"name": "priority", "type": "string", "required": true, "options": ["low", "high"]}
        ]
    });

    let (status, body) = send(
        mockdata(),
        "POST",
        "/v1/mockdata/generate",
        Some(json!({"schema": schema, "count": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = body["data"]["data"].as_array().unwrap();
    assert_eq!(records.len(), 4);
    for record in records {
        let priority = record["priority"].as_str().unwrap();
        assert!(priority == "low" || priority == "high");
    }

    let (status, body) = send(
        mockdata(),
        "POST",
        "/v1/mockdata/generate",
        Some(json!({"schema": schema, "count": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_bulk_generation_reports_per_item() {
    let (status, body) = send(
        mockdata(),
        "POST",
        "/v1/mockdata/generate-bulk",
        Some(json!({"schemas": [
            {"name": "product", "count": 2},
            {"name": "dragon", "count": 2}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["product"]["count"], 2);
    assert_eq!(body["data"]["dragon"]["count"], 0);
    assert!(body["data"]["dragon"]["error"].is_string());

    let (status, _) = send(
        mockdata(),
        "POST",
        "/v1/mockdata/generate-bulk",
        Some(json!({"schemas": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_structural_validation_returns_report_on_failure() {
    let (status, body) = send(
        mockdata(),
        "POST",
        "/v1/schemas/validate",
        Some(json!({"name": "", "fields": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Schema validation failed");
    assert_eq!(body["data"]["valid"], false);
    assert_eq!(body["data"]["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_schema_catalog_routes() {
    let (status, body) = send(mockdata(), "GET", "/v1/schemas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 5);

    let (status, body) = send(mockdata(), "GET", "/v1/schemas/types", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_object().unwrap().len(), 13);

    let (status, body) = send(mockdata(), "GET", "/v1/schemas/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "User");

    let (status, _) = send(mockdata(), "GET", "/v1/schemas/dragon/definition", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = with_layers(mockdata(), &["http://localhost:5173"]);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/v1/schemas")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}
