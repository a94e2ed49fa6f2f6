//! Prometheus metrics for core components.
//!
//! These are registered by the server's registry:
//! - Query enhancement outcomes
//! - CSV import rows
//! - PDF renders

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Query enhancement calls by result.
pub static ENHANCEMENT_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "lessons_enhancement_requests_total",
            "Total query enhancement calls",
        ),
        &["result"], // "success", "failure"
    )
    .unwrap()
});

/// Query enhancement latency.
pub static ENHANCEMENT_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "lessons_enhancement_duration_seconds",
            "Duration of query enhancement calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["result"],
    )
    .unwrap()
});

/// Imported CSV rows by result.
pub static IMPORT_ROWS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("lessons_import_rows_total", "CSV rows processed by import"),
        &["result"], // "inserted", "skipped"
    )
    .unwrap()
});

/// PDF renders by result.
pub static PDF_RENDERS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("lessons_pdf_renders_total", "Lesson PDF renders"),
        &["result"], // "success", "failure"
    )
    .unwrap()
});

/// All core metrics, for registration in the server registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ENHANCEMENT_REQUESTS.clone()),
        Box::new(ENHANCEMENT_DURATION.clone()),
        Box::new(IMPORT_ROWS.clone()),
        Box::new(PDF_RENDERS.clone()),
    ]
}
