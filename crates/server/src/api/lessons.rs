//! Lesson API handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use lessons_core::{Lesson, LessonListing, ServiceError};

use crate::state::AppState;

/// Query parameters for listing lessons
#[derive(Debug, Deserialize)]
pub struct ListLessonsParams {
    /// Free-text search; blank is the same as absent
    pub query: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

/// Map a service error onto a status and a fixed public message.
///
/// The service has already logged the cause; `generic` is used for every
/// failure other than a missing lesson.
fn to_api_error(e: ServiceError, generic: &str) -> ApiError {
    match e {
        ServiceError::NotFound(_) => api_error(StatusCode::NOT_FOUND, "Lesson not found"),
        ServiceError::Storage(_) | ServiceError::Render(_) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, generic)
        }
    }
}

/// List lessons, optionally filtered by `?query=`
pub async fn list_lessons(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListLessonsParams>,
) -> Result<Json<LessonListing>, ApiError> {
    state
        .service()
        .list_lessons(params.query.as_deref())
        .await
        .map(Json)
        .map_err(|e| to_api_error(e, "Error retrieving lessons"))
}

/// Get a lesson by ID
pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Lesson>, ApiError> {
    state
        .service()
        .get_lesson(id)
        .map(Json)
        .map_err(|e| to_api_error(e, "Error retrieving lesson"))
}

/// Plain-text lesson summary, as copied to the clipboard by the frontend
pub async fn get_lesson_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let details = state
        .service()
        .lesson_details(id)
        .map_err(|e| to_api_error(e, "Error retrieving lesson"))?;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], details))
}

/// Render a lesson as a PDF attachment
pub async fn get_lesson_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .service()
        .lesson_pdf(id)
        .await
        .map_err(|e| to_api_error(e, "Error generating PDF"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"lesson-{}.pdf\"", id),
            ),
        ],
        bytes,
    ))
}
