use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use coinlens_server::{api::app_router, build_state, config::Config};

// These tests exercise only the paths that fail before any upstream call is
// made, so the ingestion endpoint is never dialed.
async fn build_test_router(tmp: &TempDir) -> axum::Router {
    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        coingecko_api_key: None,
        ingestion_url: "http://127.0.0.1:9/ingest".to_string(),
        ingestion_service_key: "test-key".to_string(),
    };

    let state = build_state(&config).await.unwrap();
    app_router(state)
}

fn add_token_request(body: &Value, client_ip: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/add-token")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", client_ip)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_router(&tmp).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn networks_listing_includes_canonical_keys() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_router(&tmp).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/networks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let networks = json_body(response).await;
    let values: Vec<&str> = networks
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["value"].as_str().unwrap())
        .collect();
    assert!(values.contains(&"ethereum"));
    assert!(values.contains(&"bittensor"));
}

#[tokio::test]
async fn short_search_query_returns_empty_without_fanning_out() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_router(&tmp).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/search-tokens?q=a")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["candidates"].as_array().unwrap().len(), 0);
    assert_eq!(body["autoSelect"], false);
}

#[tokio::test]
async fn malformed_address_is_a_400_with_error_body() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_router(&tmp).await;

    let body = serde_json::json!({
        "contractAddress": "0x1234",
        "network": "ethereum"
    });

    let response = app
        .oneshot(add_token_request(&body, "203.0.113.7"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("address"));
}

#[tokio::test]
async fn missing_fields_are_a_400() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_router(&tmp).await;

    let body = serde_json::json!({
        "contractAddress": "",
        "network": ""
    });

    let response = app
        .oneshot(add_token_request(&body, "203.0.113.7"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submission_ceiling_yields_429() {
    let tmp = TempDir::new().unwrap();
    let app = build_test_router(&tmp).await;

    let body = serde_json::json!({
        "contractAddress": "0x1234",
        "network": "ethereum"
    });

    // Every request counts against the window, valid or not
    for _ in 0..50 {
        let response = app
            .clone()
            .oneshot(add_token_request(&body, "198.51.100.77"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .clone()
        .oneshot(add_token_request(&body, "198.51.100.77"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different client is unaffected
    let response = app
        .oneshot(add_token_request(&body, "198.51.100.78"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
