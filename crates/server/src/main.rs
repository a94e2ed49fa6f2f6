use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use lessons_core::{
    create_enhancer, FuzzyMatcher, LessonService, LessonStore, SqliteLessonStore,
};
use lessons_server::api::create_router;
use lessons_server::startup::{init_tracing, load_runtime_config};
use lessons_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Missing .env is fine; real env always wins
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = load_runtime_config(None)?;
    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);

    let store: Arc<dyn LessonStore> = Arc::new(
        SqliteLessonStore::new(&config.database.path).context("Failed to open lesson store")?,
    );
    info!("Lesson store initialized ({} lessons)", store.count().unwrap_or(0));

    let enhancer = create_enhancer(&config.enhancer).context("Failed to create enhancer")?;

    let service = LessonService::new(store, FuzzyMatcher::new(config.search.clone()))
        .with_enhancer(enhancer)
        .with_pdf_config(config.pdf.clone());

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, service));
    let app = create_router(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
