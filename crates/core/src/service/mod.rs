//! Lesson request orchestration.
//!
//! Listing runs fetch → fuzzy filter → optional enhancement, strictly in that
//! order. Enhancement failure never fails the request: the fuzzy result is
//! returned instead.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::PdfConfig;
use crate::enhancer::QueryEnhancer;
use crate::lesson::{Lesson, LessonStore, LessonStoreError};
use crate::metrics::{ENHANCEMENT_DURATION, ENHANCEMENT_REQUESTS, PDF_RENDERS};
use crate::pdf::{render_template, LopdfRenderer, PdfRenderer};
use crate::search::FuzzyMatcher;

/// Errors surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Lesson not found: {0}")]
    NotFound(i64),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<LessonStoreError> for ServiceError {
    fn from(e: LessonStoreError) -> Self {
        match e {
            LessonStoreError::NotFound(id) => ServiceError::NotFound(id),
            LessonStoreError::Database(msg) => ServiceError::Storage(msg),
        }
    }
}

/// Result of listing lessons. Serializes as a plain JSON array either way.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LessonListing {
    /// Stored lessons, either all of them or the fuzzy matches.
    Matched(Vec<Lesson>),
    /// Items returned by the enhancement service, passed through verbatim.
    Enhanced(Vec<Value>),
}

impl LessonListing {
    pub fn len(&self) -> usize {
        match self {
            LessonListing::Matched(lessons) => lessons.len(),
            LessonListing::Enhanced(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Orchestrates store, matcher, enhancer and renderer.
pub struct LessonService {
    store: Arc<dyn LessonStore>,
    matcher: FuzzyMatcher,
    enhancer: Option<Arc<dyn QueryEnhancer>>,
    renderer: Arc<dyn PdfRenderer>,
    pdf: PdfConfig,
}

impl LessonService {
    pub fn new(store: Arc<dyn LessonStore>, matcher: FuzzyMatcher) -> Self {
        Self {
            store,
            matcher,
            enhancer: None,
            renderer: Arc::new(LopdfRenderer::new()),
            pdf: PdfConfig::default(),
        }
    }

    /// Enable query enhancement.
    pub fn with_enhancer(mut self, enhancer: Option<Arc<dyn QueryEnhancer>>) -> Self {
        self.enhancer = enhancer;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn PdfRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_pdf_config(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }

    pub fn enhancement_enabled(&self) -> bool {
        self.enhancer.is_some()
    }

    /// List lessons, optionally filtered by a free-text query.
    pub async fn list_lessons(&self, query: Option<&str>) -> Result<LessonListing, ServiceError> {
        let all = self.store.list_all().map_err(|e| {
            error!(error = %e, "Failed to load lessons");
            ServiceError::from(e)
        })?;

        let query = match query.map(str::trim) {
            Some(q) if !q.is_empty() => q,
            _ => return Ok(LessonListing::Matched(all)),
        };

        let matched = self.matcher.search(&all, query);
        debug!(query = query, total = all.len(), matched = matched.len(), "Fuzzy search");

        let Some(enhancer) = &self.enhancer else {
            return Ok(LessonListing::Matched(matched));
        };

        // The enhancer sees the full catalog, not just the fuzzy matches.
        let start = Instant::now();
        match enhancer.enhance(query, &all).await {
            Ok(items) => {
                ENHANCEMENT_REQUESTS.with_label_values(&["success"]).inc();
                ENHANCEMENT_DURATION
                    .with_label_values(&["success"])
                    .observe(start.elapsed().as_secs_f64());
                debug!(query = query, results = items.len(), "Enhancement replaced results");
                Ok(LessonListing::Enhanced(items))
            }
            Err(e) => {
                ENHANCEMENT_REQUESTS.with_label_values(&["failure"]).inc();
                ENHANCEMENT_DURATION
                    .with_label_values(&["failure"])
                    .observe(start.elapsed().as_secs_f64());
                warn!(
                    query = query,
                    enhancer = enhancer.name(),
                    error = %e,
                    "Query enhancement failed, returning fuzzy results"
                );
                Ok(LessonListing::Matched(matched))
            }
        }
    }

    /// Get a single lesson.
    pub fn get_lesson(&self, id: i64) -> Result<Lesson, ServiceError> {
        self.store.get(id).map_err(|e| {
            if !matches!(e, LessonStoreError::NotFound(_)) {
                error!(lesson_id = id, error = %e, "Failed to load lesson");
            }
            ServiceError::from(e)
        })
    }

    /// Copy-to-clipboard text for a lesson.
    pub fn lesson_details(&self, id: i64) -> Result<String, ServiceError> {
        Ok(self.get_lesson(id)?.details())
    }

    /// Render the PDF export for a lesson id.
    ///
    /// The title comes from the configured template over the id. Lesson
    /// fields fill the body when the lesson exists and render empty otherwise.
    pub async fn lesson_pdf(&self, id: i64) -> Result<Vec<u8>, ServiceError> {
        let lesson = match self.store.get(id) {
            Ok(lesson) => Some(lesson),
            Err(LessonStoreError::NotFound(_)) => None,
            Err(e) => {
                error!(lesson_id = id, error = %e, "Failed to load lesson for PDF");
                return Err(e.into());
            }
        };

        let title = render_template(&self.pdf.title_template, id, lesson.as_ref());
        let body = render_template(&self.pdf.body_template, id, lesson.as_ref());

        let renderer = Arc::clone(&self.renderer);
        let result = tokio::task::spawn_blocking(move || renderer.render(&title, &body))
            .await
            .map_err(|e| ServiceError::Render(e.to_string()))
            .and_then(|r| r.map_err(|e| ServiceError::Render(e.to_string())));

        match &result {
            Ok(bytes) => {
                PDF_RENDERS.with_label_values(&["success"]).inc();
                debug!(lesson_id = id, bytes = bytes.len(), "Rendered lesson PDF");
            }
            Err(e) => {
                PDF_RENDERS.with_label_values(&["failure"]).inc();
                error!(lesson_id = id, error = %e, "Failed to render lesson PDF");
            }
        }
        result
    }
}
