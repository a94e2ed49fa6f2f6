//! HTTP implementation of the query enhancer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{EnhancementError, QueryEnhancer};
use crate::config::EnhancerConfig;
use crate::lesson::Lesson;

/// Enhancer that POSTs `{query, context}` to a configured endpoint.
pub struct HttpQueryEnhancer {
    client: Client,
    url: String,
    routing_key: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct EnhanceRequest<'a> {
    query: &'a str,
    context: &'a [Lesson],
}

impl HttpQueryEnhancer {
    /// Create a new enhancer. Both credentials must be configured.
    pub fn new(config: EnhancerConfig) -> Result<Self, EnhancementError> {
        if !config.is_enabled() {
            return Err(EnhancementError::NotConfigured(
                "both api_key and routing_key are required".to_string(),
            ));
        }

        let timeout = Duration::from_secs(config.timeout_secs as u64);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EnhancementError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url,
            routing_key: config.routing_key.unwrap_or_default(),
            timeout,
        })
    }
}

#[async_trait]
impl QueryEnhancer for HttpQueryEnhancer {
    fn name(&self) -> &str {
        "http"
    }

    async fn enhance(
        &self,
        query: &str,
        context: &[Lesson],
    ) -> Result<Vec<Value>, EnhancementError> {
        debug!(query = query, context = context.len(), "Requesting query enhancement");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.routing_key)
            .json(&EnhanceRequest { query, context })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EnhancementError::Timeout(self.timeout)
                } else {
                    EnhancementError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnhancementError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let payload: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                EnhancementError::Timeout(self.timeout)
            } else {
                EnhancementError::MalformedPayload(e.to_string())
            }
        })?;

        match payload {
            Value::Array(items) => {
                debug!(results = items.len(), "Query enhancement complete");
                Ok(items)
            }
            other => Err(EnhancementError::MalformedPayload(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
