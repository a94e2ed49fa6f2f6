use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{handlers, lessons, middleware::metrics_middleware};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let frontend_dir = state.config().frontend.dir.clone();

    let api_routes = Router::new()
        .route("/", get(handlers::root))
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Lessons
        .route("/lessons", get(lessons::list_lessons))
        .route("/lessons/{id}", get(lessons::get_lesson))
        .route("/lessons/{id}/details", get(lessons::get_lesson_details))
        .route("/lessons/{id}/pdf", get(lessons::get_lesson_pdf))
        .with_state(state);

    // Serve the frontend with index fallback
    let index_path = frontend_dir.join("index.html");
    let serve_dir = ServeDir::new(&frontend_dir).fallback(ServeFile::new(index_path));

    api_routes
        .nest_service("/app", serve_dir)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
