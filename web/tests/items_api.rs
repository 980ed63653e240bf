//! HTTP behaviour of the item endpoints, through the real router.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};
use todo_list_core::item::ItemId;
use todo_list_testing::TestHarness;
use todo_list_testing::helpers::{failing_service, init_tracing};
use todo_list_web::routes::MAX_BODY_BYTES;
use todo_list_web::{AppState, build_router};
use tower::ServiceExt;

fn server(harness: &TestHarness) -> TestServer {
    init_tracing();
    TestServer::new(build_router(AppState::new(harness.service.clone()))).unwrap()
}

#[tokio::test]
async fn test_health_reports_version() {
    let harness = TestHarness::new();
    let response = server(&harness).get("/health").await;

    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}));
}

#[tokio::test]
async fn test_create_returns_stored_item() {
    let harness = TestHarness::new();
    let response = server(&harness)
        .post("/items")
        .json(&json!({"label": "buy milk", "completed": false}))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["id"], "item-1");
    assert_eq!(body["label"], "buy milk");
    assert_eq!(body["completed"], false);
    assert_eq!(body["createdAt"], body["updatedAt"]);

    let stored = harness.service.get(&ItemId::new("item-1")).await.unwrap();
    assert_eq!(serde_json::to_value(stored).unwrap(), body);
}

#[tokio::test]
async fn test_create_ignores_content_type() {
    let harness = TestHarness::new();
    let response = server(&harness)
        .post("/items")
        .text(r#"{"label":"plain text body","completed":true}"#)
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(harness.store.len().await, 1);
}

#[tokio::test]
async fn test_malformed_body_is_400_and_writes_nothing() {
    let harness = TestHarness::new();
    let response = server(&harness).post("/items").text("{not json").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("invalid request body format"), "{message}");
    assert_eq!(harness.store.write_count(), 0);
}

#[tokio::test]
async fn test_oversized_body_is_json_413_and_writes_nothing() {
    let harness = TestHarness::new();
    let server = server(&harness);
    let label = "x".repeat(MAX_BODY_BYTES + 1);
    let oversized = json!({"label": label, "completed": false}).to_string();

    let response = server.post("/items").text(oversized.clone()).await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.header(header::CONTENT_TYPE), "application/json");
    response.assert_json(&json!({
        "error": format!("request body exceeds {MAX_BODY_BYTES} bytes")
    }));

    server
        .post("/items")
        .json(&json!({"label": "buy milk", "completed": false}))
        .await
        .assert_status(StatusCode::OK);
    let response = server.put("/items/item-1").text(oversized).await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    assert_eq!(harness.store.write_count(), 1);
}

#[tokio::test]
async fn test_body_at_the_limit_is_read() {
    let harness = TestHarness::new();
    let envelope = json!({"label": "", "completed": false}).to_string().len();
    let label = "x".repeat(MAX_BODY_BYTES - envelope);
    let body = json!({"label": label, "completed": false}).to_string();
    assert_eq!(body.len(), MAX_BODY_BYTES);

    let response = server(&harness).post("/items").text(body).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(harness.store.len().await, 1);
}

#[tokio::test]
async fn test_validation_lists_every_invalid_field() {
    let harness = TestHarness::new();
    let response = server(&harness)
        .post("/items")
        .json(&json!({"label": "", "completed": "yes"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "errors": ["label must not be empty", "completed must be a boolean"]
    }));
    assert_eq!(harness.store.write_count(), 0);
}

#[tokio::test]
async fn test_update_keeps_id_and_created_at() {
    let harness = TestHarness::new();
    let server = server(&harness);

    let created: Value = server
        .post("/items")
        .json(&json!({"label": "buy milk", "completed": false}))
        .await
        .json();

    harness.clock.advance(chrono::Duration::seconds(5));

    let response = server
        .put("/items/item-1")
        .json(&json!({"id": "other", "label": "buy oat milk", "completed": true}))
        .await;

    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["id"], "item-1");
    assert_eq!(updated["label"], "buy oat milk");
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let harness = TestHarness::new();
    let response = server(&harness)
        .put("/items/missing")
        .json(&json!({"label": "x", "completed": false}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"error": "item not found"}));
    assert_eq!(harness.store.write_count(), 0);
}

#[tokio::test]
async fn test_update_with_malformed_body_is_400() {
    let harness = TestHarness::new();
    let server = server(&harness);
    server
        .post("/items")
        .json(&json!({"label": "buy milk", "completed": false}))
        .await
        .assert_status(StatusCode::OK);

    let response = server
        .put("/items/item-1")
        .text(r#"{label: "buy milk", "completed": true}"#)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("invalid request body format: "), "{message}");
    assert_eq!(harness.store.write_count(), 1);

    let stored = harness.service.get(&ItemId::new("item-1")).await.unwrap();
    assert!(!stored.completed);
}

#[tokio::test]
async fn test_update_store_failure_is_generic_500() {
    let server = TestServer::new(build_router(AppState::new(failing_service()))).unwrap();

    let response = server
        .put("/items/item-1")
        .json(&json!({"label": "x", "completed": true}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "code": "INTERNAL_SERVER_ERROR",
        "message": "An internal error occurred"
    }));
}

#[tokio::test]
async fn test_update_with_invalid_body_is_400_even_for_unknown_id() {
    let harness = TestHarness::new();
    let response = server(&harness)
        .put("/items/missing")
        .json(&json!({"completed": false}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"errors": ["label is required"]}));
}

#[tokio::test]
async fn test_list_empty_store_is_404() {
    let harness = TestHarness::new();
    let response = server(&harness).get("/items").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"error": "No items available"}));
}

#[tokio::test]
async fn test_list_returns_every_item() {
    let harness = TestHarness::new();
    let server = server(&harness);
    for label in ["one", "two"] {
        server
            .post("/items")
            .json(&json!({"label": label, "completed": false}))
            .await
            .assert_status(StatusCode::OK);
    }

    let response = server.get("/items").await;
    response.assert_status(StatusCode::OK);
    let items: Vec<Value> = response.json();
    let mut labels: Vec<&str> = items.iter().map(|i| i["label"].as_str().unwrap()).collect();
    labels.sort_unstable();
    assert_eq!(labels, ["one", "two"]);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let harness = TestHarness::new();
    let server = server(&harness);
    server
        .post("/items")
        .json(&json!({"label": "buy milk", "completed": false}))
        .await
        .assert_status(StatusCode::OK);

    let response = server.delete("/items/item-1").await;
    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({"success": "Item deleted successfully"}));
    assert!(harness.store.is_empty().await);

    let again = server.delete("/items/item-1").await;
    again.assert_status(StatusCode::NOT_FOUND);
    again.assert_json(&json!({"error": "item not found"}));
}

#[tokio::test]
async fn test_buy_milk_scenario() {
    let harness = TestHarness::new();
    let server = server(&harness);

    let created: Value = server
        .post("/items")
        .json(&json!({"label": "buy milk", "completed": false}))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    let updated: Value = server
        .put(&format!("/items/{id}"))
        .json(&json!({"label": "buy milk", "completed": true}))
        .await
        .json();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let listed: Vec<Value> = server.get("/items").await.json();
    assert_eq!(listed, vec![updated]);

    server
        .delete(&format!("/items/{id}"))
        .await
        .assert_status(StatusCode::OK);
    server
        .delete(&format!("/items/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/items")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let app = build_router(AppState::new(failing_service()));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/items").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "code": "INTERNAL_SERVER_ERROR",
        "message": "An internal error occurred"
    }));

    let response = server
        .post("/items")
        .json(&json!({"label": "x", "completed": false}))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("connection refused"));
}

#[tokio::test]
async fn test_responses_are_pretty_printed_json() {
    let harness = TestHarness::new();
    let app = build_router(AppState::new(harness.service.clone()));

    let request = Request::builder()
        .uri("/items")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"{\n  \"error\": \"No items available\"\n}");
}

#[tokio::test]
async fn test_request_id_generated_if_missing() {
    let harness = TestHarness::new();
    let app = build_router(AppState::new(harness.service.clone()));

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("request id header should be present");
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn test_request_id_preserved_from_request() {
    let harness = TestHarness::new();
    let app = build_router(AppState::new(harness.service.clone()));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
}
