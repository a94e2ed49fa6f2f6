//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, enabling E2E testing without a real
//! enhancement service.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use lessons_core::testing::{MockPdfRenderer, MockQueryEnhancer};
use lessons_core::{
    Config, FrontendConfig, FuzzyMatcher, Lesson, LessonService, LessonStore, PdfRenderer,
    QueryEnhancer,
};
use lessons_server::state::AppState;

/// Re-export fixtures for test convenience
pub use lessons_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_list() {
///     let fixture = TestFixture::new(&[fixtures::lesson(1, "Intro to Git", "VCS", "basics")]);
///     let response = fixture.get("/lessons?query=git").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock enhancer, only wired in when `TestConfig::with_enhancer` is set
    pub enhancer: Arc<MockQueryEnhancer>,
    /// Temporary directory holding the frontend files
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Bytes,
    /// Parsed JSON body, `Null` when the body is empty or not JSON
    pub body: Value,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Configuration for test fixture.
#[derive(Default)]
pub struct TestConfig {
    /// Route queries through the mock enhancer
    pub with_enhancer: bool,
    /// Replace the lopdf renderer
    pub renderer: Option<Arc<dyn PdfRenderer>>,
    /// Replace the seeded store
    pub store: Option<Arc<dyn LessonStore>>,
}

impl TestConfig {
    pub fn with_enhancer() -> Self {
        Self {
            with_enhancer: true,
            ..Default::default()
        }
    }

    pub fn with_failing_renderer() -> Self {
        Self {
            renderer: Some(Arc::new(MockPdfRenderer::failing())),
            ..Default::default()
        }
    }

    pub fn with_store(store: Arc<dyn LessonStore>) -> Self {
        Self {
            store: Some(store),
            ..Default::default()
        }
    }
}

impl TestFixture {
    /// Fixture over `lessons` with no enhancer and the real PDF renderer.
    pub fn new(lessons: &[Lesson]) -> Self {
        Self::with_config(lessons, TestConfig::default())
    }

    pub fn with_config(lessons: &[Lesson], test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let frontend_dir = temp_dir.path().join("frontend");
        std::fs::create_dir_all(&frontend_dir).expect("Failed to create frontend dir");
        std::fs::write(
            frontend_dir.join("index.html"),
            "<!doctype html><title>Lessons</title>",
        )
        .expect("Failed to write index.html");

        let config = Config {
            frontend: FrontendConfig { dir: frontend_dir },
            ..Default::default()
        };

        let store = test_config
            .store
            .unwrap_or_else(|| fixtures::seeded_store(lessons));
        let enhancer = Arc::new(MockQueryEnhancer::new());

        let mut service = LessonService::new(store, FuzzyMatcher::new(config.search.clone()))
            .with_pdf_config(config.pdf.clone());
        if test_config.with_enhancer {
            service = service
                .with_enhancer(Some(Arc::clone(&enhancer) as Arc<dyn QueryEnhancer>));
        }
        if let Some(renderer) = test_config.renderer {
            service = service.with_renderer(renderer);
        }

        let state = Arc::new(AppState::new(config, service));
        let router = lessons_server::api::create_router(state);

        Self {
            router,
            enhancer,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
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
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status,
            $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text()
        );
    };
}
