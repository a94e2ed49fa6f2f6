//! End-to-end tests of the HTTP API against an in-process router.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{fixtures, TestConfig, TestFixture};
use lessons_core::EnhancementError;
use lessons_core::{FuzzyMatcher, Lesson};

fn catalog() -> Vec<Lesson> {
    vec![
        fixtures::lesson(1, "Intro to Git", "VCS", "basics"),
        fixtures::lesson(2, "Rust Ownership", "Languages", "borrowing and moves"),
        fixtures::lesson(3, "Branching with Git", "VCS", "merge and rebase"),
        fixtures::lesson(4, "SQL Joins", "Databases", "inner and outer joins"),
    ]
}

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["id"].as_i64().expect("numeric id"))
        .collect()
}

// ============================================================================
// Root, health, config, metrics
// ============================================================================

#[tokio::test]
async fn test_root_greeting() {
    let fixture = TestFixture::new(&[]);
    let response = fixture.get("/").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.text(), "Hello, TalentLMS!");
}

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new(&[]);
    let response = fixture.get("/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_is_sanitized() {
    let fixture = TestFixture::new(&[]);
    let response = fixture.get("/config").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["server"]["port"], 3000);
    assert_eq!(response.body["enhancer"]["enabled"], false);
    assert!(response.body["enhancer"].get("api_key").is_none());
    assert!(response.body["enhancer"].get("routing_key").is_none());
}

#[tokio::test]
async fn test_metrics_endpoint_reports_http_requests() {
    let fixture = TestFixture::new(&catalog());
    fixture.get("/lessons/1").await;

    let response = fixture.get("/metrics").await;
    assert_status!(response, StatusCode::OK);
    assert!(response.text().contains("lessons_http_requests_total"));
    assert!(response.text().contains("path=\"/lessons/{id}\""));
    assert!(!response.text().contains("path=\"/lessons/1\""));
}

#[tokio::test]
async fn test_frontend_served_under_app() {
    let fixture = TestFixture::new(&[]);
    let response = fixture.get("/app/index.html").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.text().contains("<title>Lessons</title>"));
}

#[tokio::test]
async fn test_frontend_copy_requires_successful_details() {
    let page = include_str!("../../../frontend/index.html");
    let handler = &page[page
        .find("getElementById('copy').onclick")
        .expect("copy handler")..];
    let guard = handler.find("if (!response.ok)").expect("status check");
    let write = handler
        .find("clipboard.writeText")
        .expect("clipboard write");
    assert!(guard < write);

    // The endpoint the handler checks reports a missing lesson as non-2xx
    let fixture = TestFixture::new(&catalog());
    let missing = fixture.get("/lessons/404/details").await;
    assert_status!(missing, StatusCode::NOT_FOUND);
}

// ============================================================================
// Listing and search
// ============================================================================

#[tokio::test]
async fn test_list_without_query_returns_all_in_order() {
    let fixture = TestFixture::new(&catalog());
    let response = fixture.get("/lessons").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![1, 2, 3, 4]);
    assert_eq!(response.body[0]["lesson_name"], "Intro to Git");
    assert_eq!(response.body[0]["category"], "VCS");
}

#[tokio::test]
async fn test_list_blank_query_returns_all() {
    let fixture = TestFixture::new(&catalog());
    let response = fixture.get("/lessons?query=%20%20").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(ids(&response.body).len(), 4);
}

#[tokio::test]
async fn test_list_empty_store() {
    let fixture = TestFixture::new(&[]);
    let response = fixture.get("/lessons").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_query_git_matches_single_lesson() {
    let fixture = TestFixture::new(&[fixtures::lesson(1, "Intro to Git", "VCS", "basics")]);

    let response = fixture.get("/lessons?query=git").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![1]);
    assert_eq!(response.body[0]["lesson_name"], "Intro to Git");

    let response = fixture.get("/lessons?query=xyz123").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_query_results_are_subset_within_threshold() {
    let lessons = catalog();
    let fixture = TestFixture::new(&lessons);
    let matcher = FuzzyMatcher::default();

    let response = fixture.get("/lessons?query=git").await;
    assert_status!(response, StatusCode::OK);

    let returned = ids(&response.body);
    assert!(!returned.is_empty());
    for id in &returned {
        let lesson = lessons.iter().find(|l| l.id == *id).expect("subset of stored");
        let score = matcher.score(lesson, "git").expect("matched lessons score");
        assert!(score <= 0.3, "lesson {} scored {}", id, score);
    }
    assert!(!returned.contains(&4));
}

#[tokio::test]
async fn test_list_storage_failure_returns_500() {
    let fixture =
        TestFixture::with_config(&[], TestConfig::with_store(fixtures::broken_store()));
    let response = fixture.get("/lessons").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"message": "Error retrieving lessons"}));
}

// ============================================================================
// Enhancement
// ============================================================================

#[tokio::test]
async fn test_enhancer_failure_falls_back_to_fuzzy() {
    let fixture = TestFixture::with_config(&catalog(), TestConfig::with_enhancer());
    fixture
        .enhancer
        .set_error(EnhancementError::Api {
            status: 503,
            message: "unavailable".to_string(),
        })
        .await;

    let fallback = fixture.get("/lessons?query=git").await;
    assert_status!(fallback, StatusCode::OK);

    let plain = TestFixture::new(&catalog()).get("/lessons?query=git").await;
    assert_eq!(fallback.body, plain.body);
}

#[tokio::test]
async fn test_enhancer_timeout_falls_back_to_fuzzy() {
    let fixture = TestFixture::with_config(&catalog(), TestConfig::with_enhancer());
    fixture
        .enhancer
        .set_error(EnhancementError::Timeout(std::time::Duration::from_secs(10)))
        .await;

    let response = fixture.get("/lessons?query=sql").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![4]);
}

#[tokio::test]
async fn test_enhancer_success_replaces_results() {
    let fixture = TestFixture::with_config(&catalog(), TestConfig::with_enhancer());
    let items = vec![json!({"id": 2, "reason": "closest"}), json!("free text")];
    fixture.enhancer.set_response(items.clone()).await;

    let response = fixture.get("/lessons?query=git").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!(items));

    let calls = fixture.enhancer.recorded_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, "git");
    assert_eq!(calls[0].context_ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_enhancer_not_called_without_query() {
    let fixture = TestFixture::with_config(&catalog(), TestConfig::with_enhancer());
    fixture.enhancer.set_response(vec![json!({"id": 99})]).await;

    let response = fixture.get("/lessons").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![1, 2, 3, 4]);
    assert!(fixture.enhancer.recorded_calls().await.is_empty());
}

// ============================================================================
// Single lesson
// ============================================================================

#[tokio::test]
async fn test_get_lesson() {
    let fixture = TestFixture::new(&catalog());
    let response = fixture.get("/lessons/2").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["id"], 2);
    assert_eq!(response.body["lesson_name"], "Rust Ownership");
    assert_eq!(response.body["lesson_number"], "L2");
    assert_eq!(response.body["url"], "https://lessons.example.com/2");
}

#[tokio::test]
async fn test_get_missing_lesson_returns_404() {
    let fixture = TestFixture::new(&catalog());
    let response = fixture.get("/lessons/999").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"message": "Lesson not found"}));
}

#[tokio::test]
async fn test_get_lesson_non_integer_id_rejected() {
    let fixture = TestFixture::new(&catalog());
    let response = fixture.get("/lessons/abc").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_lesson_storage_failure_returns_500() {
    let fixture =
        TestFixture::with_config(&[], TestConfig::with_store(fixtures::broken_store()));
    let response = fixture.get("/lessons/1").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"message": "Error retrieving lesson"}));
}

#[tokio::test]
async fn test_lesson_details_plain_text() {
    let fixture = TestFixture::new(&catalog());
    let response = fixture.get("/lessons/1/details").await;

    assert_status!(response, StatusCode::OK);
    assert!(response
        .header("content-type")
        .unwrap_or_default()
        .starts_with("text/plain"));
    assert_eq!(
        response.text(),
        "Intro to Git\nLesson: L1\nCategory: VCS\nSummary: basics\nURL: https://lessons.example.com/1"
    );

    let missing = fixture.get("/lessons/42/details").await;
    assert_status!(missing, StatusCode::NOT_FOUND);
}

// ============================================================================
// PDF
// ============================================================================

#[tokio::test]
async fn test_lesson_pdf() {
    let fixture = TestFixture::new(&catalog());
    let response = fixture.get("/lessons/1/pdf").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.bytes.starts_with(b"%PDF"));
    assert_eq!(response.header("content-type"), Some("application/pdf"));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"lesson-1.pdf\"")
    );
}

#[tokio::test]
async fn test_pdf_for_missing_lesson_still_renders() {
    let fixture = TestFixture::new(&catalog());
    let response = fixture.get("/lessons/500/pdf").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_pdf_render_failure_returns_500() {
    let fixture = TestFixture::with_config(&catalog(), TestConfig::with_failing_renderer());
    let response = fixture.get("/lessons/1/pdf").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"message": "Error generating PDF"}));
}
