//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that builds the router in-process
//! with mock artwork and geometry collaborators, so order intake can be
//! driven end to end without the order API.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use labelbridge_core::{
    testing::{MockArtworkSource, MockGeometryExtractor},
    ArtworkSource, Config, GeometryExtractor, ServerConfig, StagingConfig,
};
use labelbridge_server::state::AppState;

/// Re-export fixtures for test convenience
pub use labelbridge_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_order_intake() {
///     let fixture = TestFixture::new();
///     let response = fixture.post("/api/v1/orders", fixtures::order_json()).await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock artwork source - records fetches, can fail URLs
    pub source: Arc<MockArtworkSource>,
    /// Mock geometry extractor - configure the trim box
    pub geometry: Arc<MockGeometryExtractor>,
    /// The configuration the router was built from
    pub config: Config,
    /// Temporary directory holding the staging dirs
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub fn new() -> Self {
        Self::with_config(|_, _| {})
    }

    /// Create a test fixture, adjusting the configuration before wiring.
    pub fn with_config(adjust: impl FnOnce(&mut Config, &Path)) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            staging: StagingConfig::rooted_at(temp_dir.path())
                .with_secondary_dir(temp_dir.path().join("hold")),
            ..Default::default()
        };
        adjust(&mut config, temp_dir.path());

        let source = Arc::new(MockArtworkSource::new());
        let geometry = Arc::new(MockGeometryExtractor::with_trim_mm(80.0, 50.0));

        let state = AppState::from_config(
            config.clone(),
            Arc::clone(&source) as Arc<dyn ArtworkSource>,
            Arc::clone(&geometry) as Arc<dyn GeometryExtractor>,
        )
        .expect("Failed to build app state");

        let router = labelbridge_server::api::create_router(Arc::new(state));

        Self {
            router,
            source,
            geometry,
            config,
            temp_dir,
        }
    }

    /// Folder holding the JSON and artwork of one design.
    pub fn design_folder(&self, reference: &str, index: usize) -> PathBuf {
        self.config
            .staging
            .download_dir
            .join(format!("{}_{}", reference, index))
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, &[]).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), &[]).await
    }

    /// Send a POST request with JSON body and extra headers.
    pub async fn post_with_headers(
        &self,
        path: &str,
        body: Value,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        self.request("POST", path, Some(body), headers).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Fetch a plain-text body (for /metrics).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            request_builder = request_builder.header(*name, *value);
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
