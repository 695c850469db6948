//! End-to-end tests with mocked external dependencies.
//!
//! These tests run the full router in-process with mock implementations
//! for the order API artwork downloads and the PDF geometry reader.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestFixture};

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_config_endpoint() {
    let fixture = TestFixture::with_config(|config, _| {
        config.normalizer.supplier_id = "Print.com NL".to_string();
    });
    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["normalizer"]["supplier_id"], "Print.com NL");
    assert_eq!(response.body["normalizer"]["fallback_winding"], 2);
    assert_eq!(response.body["order_source"]["token_max_age_secs"], 3600);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/tickets").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Token Tests
// =============================================================================

#[tokio::test]
async fn test_token_status_initially_empty() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/token").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["present"], false);
    assert!(response.body.get("received_at").is_none());
}

#[tokio::test]
async fn test_submit_token() {
    let fixture = TestFixture::new();
    let response = fixture
        .post("/api/v1/token", json!({ "token": "Bearer cached-token" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .starts_with("Token received "));
    assert!(response.body["received_at"].is_string());
    // The token itself is never echoed
    assert!(!response.body.to_string().contains("cached-token"));

    let status = fixture.get("/api/v1/token").await;
    assert_eq!(status.body["present"], true);
    assert!(status.body["received_at"].is_string());
}

#[tokio::test]
async fn test_submit_blank_token_rejected() {
    let fixture = TestFixture::new();
    let response = fixture.post("/api/v1/token", json!({ "token": "   " })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());

    let status = fixture.get("/api/v1/token").await;
    assert_eq!(status.body["present"], false);
}

#[tokio::test]
async fn test_submit_token_missing_field() {
    let fixture = TestFixture::new();
    let response = fixture.post("/api/v1/token", json!({ "value": "abc" })).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Order Intake Tests
// =============================================================================

#[tokio::test]
async fn test_order_intake() {
    let fixture = TestFixture::new();
    let response = fixture.post("/api/v1/orders", fixtures::order_json()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Order item collected successfully");
    assert_eq!(response.body["reference"], fixtures::ORDER_REFERENCE);
    assert_eq!(response.body["records"], 2);
    assert_eq!(response.body["failed_downloads"], 0);

    let first = &response.body["designs"][0];
    assert_eq!(first["index"], 1);
    assert_eq!(first["design"]["status"], "downloaded");
    assert_eq!(first["jobsheet"]["status"], "downloaded");
    assert_eq!(first["dimension_check"]["outcome"], "matches");
    assert_eq!(first["record"]["OrderQuantity"], 600);
    assert_eq!(first["record"]["Winding"], 3);

    // Design PDF, jobsheet and JSON side by side
    let folder = fixture.design_folder(fixtures::ORDER_REFERENCE, 1);
    assert!(folder
        .join(format!("{}_design_1.pdf", fixtures::ORDER_ID))
        .exists());
    assert!(folder
        .join(format!("{}_jobsheet_1.pdf", fixtures::ORDER_ID))
        .exists());
    assert!(folder
        .join(format!("{}_1.json", fixtures::ORDER_REFERENCE))
        .exists());

    // Zip in the outbox, design copy in the secondary dir
    assert!(fixture
        .config
        .staging
        .outbox_dir
        .join(format!("{}_2.zip", fixtures::ORDER_REFERENCE))
        .exists());
    assert!(fixture
        .temp_dir
        .path()
        .join(format!("hold/{}_2_ex_1.pdf", fixtures::ORDER_ID))
        .exists());

    // Two designs, each with a design PDF and a jobsheet
    assert_eq!(fixture.source.fetch_count().await, 4);
    assert_eq!(fixture.geometry.calls().len(), 2);
}

#[tokio::test]
async fn test_order_uses_cached_token() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/token", json!({ "token": "Bearer cached-token" }))
        .await;

    let response = fixture.post("/api/v1/orders", fixtures::order_json()).await;
    assert_eq!(response.status, StatusCode::OK);

    let fetches = fixture.source.recorded_fetches().await;
    assert!(!fetches.is_empty());
    assert!(fetches
        .iter()
        .all(|f| f.credential.as_deref() == Some("Bearer cached-token")));
}

#[tokio::test]
async fn test_order_header_token_wins_over_cache() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/token", json!({ "token": "Bearer cached-token" }))
        .await;

    let response = fixture
        .post_with_headers(
            "/api/v1/orders",
            fixtures::order_json(),
            &[("Authorization", "Bearer request-token")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let fetches = fixture.source.recorded_fetches().await;
    assert!(fetches
        .iter()
        .all(|f| f.credential.as_deref() == Some("Bearer request-token")));
}

#[tokio::test]
async fn test_order_without_token_downloads_anonymously() {
    let fixture = TestFixture::new();
    let response = fixture.post("/api/v1/orders", fixtures::order_json()).await;
    assert_eq!(response.status, StatusCode::OK);

    let fetches = fixture.source.recorded_fetches().await;
    assert!(fetches.iter().all(|f| f.credential.is_none()));
}

#[tokio::test]
async fn test_failed_download_still_stages_record() {
    let fixture = TestFixture::new();
    fixture
        .source
        .fail_url("https://api.example.com/designs/d1")
        .await;

    let response = fixture.post("/api/v1/orders", fixtures::order_json()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["records"], 2);
    assert_eq!(response.body["failed_downloads"], 1);
    assert_eq!(response.body["designs"][0]["design"]["status"], "failed");
    assert!(response.body["designs"][0].get("dimension_check").is_none());
    assert_eq!(response.body["designs"][1]["design"]["status"], "downloaded");
    assert!(fixture
        .design_folder(fixtures::ORDER_REFERENCE, 1)
        .join(format!("{}_1.json", fixtures::ORDER_REFERENCE))
        .exists());
}

#[tokio::test]
async fn test_unreadable_artwork_is_reported() {
    let fixture = TestFixture::new();
    fixture.geometry.set_error("not a PDF at all");

    let response = fixture.post("/api/v1/orders", fixtures::order_json()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["designs"][0]["dimension_check"]["outcome"],
        "unreadable"
    );
}

#[tokio::test]
async fn test_order_without_designs_rejected() {
    let fixture = TestFixture::new();
    let mut order = fixtures::order_json();
    order["designs"] = json!([]);

    let response = fixture.post("/api/v1/orders", order).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["reference"], fixtures::ORDER_REFERENCE);
    assert!(response.body["error"].is_string());
    assert_eq!(fixture.source.fetch_count().await, 0);
    assert!(!fixture.config.staging.download_dir.exists());
}

#[tokio::test]
async fn test_order_with_unknown_glue_rejected() {
    let fixture = TestFixture::new();
    let mut order = fixtures::order_json();
    order["options"]
        .as_object_mut()
        .unwrap()
        .remove("type_glue");

    let response = fixture.post("/api/v1/orders", order).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["reference"], fixtures::ORDER_REFERENCE);
}

#[tokio::test]
async fn test_order_without_address_rejected() {
    let fixture = TestFixture::new();
    let mut order = fixtures::order_json();
    order["shipments"][0]
        .as_object_mut()
        .unwrap()
        .remove("address");

    let response = fixture.post("/api/v1/orders", order).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("shipments.address"));
    assert!(!fixture.config.staging.download_dir.exists());
}

#[tokio::test]
async fn test_order_reference_with_path_segments_rejected() {
    let fixture = TestFixture::new();
    let mut order = fixtures::order_json();
    order["orderItemNumber"] = json!("../../escaped");

    let response = fixture.post("/api/v1/orders", order).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(fixture.source.fetch_count().await, 0);
    assert!(!fixture.temp_dir.path().join("escaped_1").exists());
    assert!(!fixture.config.staging.outbox_dir.exists());
}

#[tokio::test]
async fn test_malformed_order_json() {
    let fixture = TestFixture::new();
    let response = fixture.post_raw("/api/v1/orders", "{not json").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
    assert!(response.body.get("reference").is_none());
}

#[tokio::test]
async fn test_staging_failure_returns_500() {
    let fixture = TestFixture::with_config(|config, root| {
        // A plain file where the download dir should be
        let blocker = root.join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        config.staging.download_dir = blocker;
    });

    let response = fixture.post("/api/v1/orders", fixtures::order_json()).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["reference"], fixtures::ORDER_REFERENCE);
}

// =============================================================================
// Metrics Tests
// =============================================================================

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.post("/api/v1/orders", fixtures::order_json()).await;

    let (status, body) = fixture.get_text("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("labelbridge_http_requests_total"));
    assert!(body.contains("/api/v1/orders"));
    assert!(body.contains("labelbridge_orders_received_total"));
}
