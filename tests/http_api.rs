//! REST API tests driven through the router without a socket
//!
//! Run with: cargo test --test http_api

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use design_kb::config::HttpConfig;
use design_kb::http::router;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn test_app() -> (tempfile::TempDir, Router) {
    let (dir, ctx) = common::app();
    let app = router(ctx, &HttpConfig::default()).unwrap();
    (dir, app)
}

#[tokio::test]
async fn test_feature_lifecycle() {
    let (_dir, app) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/features",
        Some(common::feature("Checkout", "Pay for a cart")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["isUpdate"], false);
    assert!(body["timestamp"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/api/features",
        Some(common::feature("Checkout", "Pay for a cart, now with coupons")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isUpdate"], true);

    let (status, body) = send(&app, "GET", "/api/resources/features", None).await;
    assert_eq!(status, StatusCode::OK);
    let features = body["data"]["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["name"], "Checkout");
    assert_eq!(features[0]["purpose"], "Pay for a cart, now with coupons");

    let (status, body) = send(&app, "DELETE", "/api/features/Checkout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["found"], true);

    let (status, body) = send(&app, "DELETE", "/api/features/Checkout", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Feature 'Checkout' not found");
}

#[tokio::test]
async fn test_invalid_feature_is_bad_request() {
    let (dir, app) = test_app();

    let mut payload = common::feature("Checkout", "Pay");
    payload["coreLogicSteps"][1]["stepNumber"] = json!(1);
    let (status, body) = send(&app, "POST", "/api/features", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("coreLogicSteps: duplicate stepNumber 1"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/features",
        Some(common::feature("2Fast", "Pay")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(!dir.path().join("design.json").exists());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (_dir, app) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/terms")
        .header("content-type", "application/json")
        .body(Body::from("{\"term\": "))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_terms_and_details() {
    let (_dir, app) = test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/terms",
        Some(common::term("Order Line", "Value Object", "Sales")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    send(&app, "POST", "/api/features", Some(common::feature("Checkout", "Pay"))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/details",
        Some(json!({"featureNames": ["Checkout", "Refund"], "termNames": ["Order Line"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["features"]["found"][0]["feature"]["name"], "Checkout");
    assert_eq!(data["features"]["notFound"], json!(["Refund"]));
    assert_eq!(data["terms"]["found"][0]["details"]["category"], "Value Object");
    assert_eq!(data["terms"]["notFound"], json!([]));

    let (status, _) = send(
        &app,
        "POST",
        "/api/details",
        Some(json!({"featureNames": "Checkout"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/resources/terms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["terms"][0]["name"], "Order Line");

    let (status, _) = send(&app, "DELETE", "/api/terms/Order%20Line", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_statistics_and_health() {
    let (dir, app) = test_app();

    send(&app, "POST", "/api/terms", Some(common::term("Order", "Entity", "Sales"))).await;
    send(&app, "POST", "/api/terms", Some(common::term("Invoice", "Entity", "Billing"))).await;
    send(&app, "POST", "/api/terms", Some(common::term("Refund Policy", "Policy", "Billing"))).await;

    let (status, body) = send(&app, "GET", "/api/resources/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalTerms"], 3);
    assert_eq!(body["data"]["totalFeatures"], 0);
    assert_eq!(body["data"]["termsByCategory"], json!({"Entity": 2, "Policy": 1}));

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["terms"], 3);

    std::fs::write(dir.path().join("design.json"), "{ not json").unwrap();
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "unhealthy");
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let (dir, app) = test_app();
    std::fs::write(dir.path().join("design.json"), "[1, 2").unwrap();

    let (status, body) = send(&app, "GET", "/api/resources/features", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "storage_error");
}

#[tokio::test]
async fn test_restricted_cors_origin() {
    let (_dir, ctx) = common::app();
    let config = HttpConfig {
        cors_origin: "https://design.example.com".to_string(),
        ..HttpConfig::default()
    };
    let app = router(ctx, &config).unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/resources/features")
        .header("origin", "https://design.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://design.example.com"
    );
}
