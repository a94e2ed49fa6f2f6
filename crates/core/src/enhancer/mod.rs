//! Query enhancement through an external AI service.
//!
//! The service receives the user query plus candidate lessons and returns a
//! re-ranked or annotated result collection whose shape it alone defines.
//! Callers must treat any error as "enhancement unavailable" and fall back.

mod http;

pub use http::HttpQueryEnhancer;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::config::EnhancerConfig;
use crate::lesson::Lesson;

/// Error type for enhancement calls.
#[derive(Debug, Clone, Error)]
pub enum EnhancementError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

/// Trait for query enhancement backends.
#[async_trait]
pub trait QueryEnhancer: Send + Sync {
    /// Backend name for logs and metrics.
    fn name(&self) -> &str;

    /// Ask the service for a replacement result collection.
    async fn enhance(&self, query: &str, context: &[Lesson])
        -> Result<Vec<Value>, EnhancementError>;
}

/// Create the enhancer described by `config`, or `None` when either
/// credential is missing.
pub fn create_enhancer(
    config: &EnhancerConfig,
) -> Result<Option<Arc<dyn QueryEnhancer>>, EnhancementError> {
    if !config.is_enabled() {
        info!("Query enhancement disabled (credentials not configured)");
        return Ok(None);
    }

    let enhancer = HttpQueryEnhancer::new(config.clone())?;
    info!(url = %config.url, "Query enhancement enabled");
    Ok(Some(Arc::new(enhancer)))
}
