//! Mock query enhancer for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::enhancer::{EnhancementError, QueryEnhancer};
use crate::lesson::Lesson;

/// A recorded enhancement call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedEnhancement {
    pub query: String,
    /// Ids of the lessons passed as context, in order.
    pub context_ids: Vec<i64>,
}

/// Mock implementation of the QueryEnhancer trait.
///
/// Returns a configurable response (empty by default), or fails every call
/// once an error is set. All calls are recorded.
#[derive(Default)]
pub struct MockQueryEnhancer {
    response: Arc<RwLock<Vec<Value>>>,
    error: Arc<RwLock<Option<EnhancementError>>>,
    calls: Arc<RwLock<Vec<RecordedEnhancement>>>,
}

impl std::fmt::Debug for MockQueryEnhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockQueryEnhancer")
            .field("response", &"<response>")
            .field("error", &"<error>")
            .field("calls", &"<calls>")
            .finish()
    }
}

impl MockQueryEnhancer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items returned by successful calls.
    pub async fn set_response(&self, items: Vec<Value>) {
        *self.response.write().await = items;
    }

    /// Make every subsequent call fail with `error`.
    pub async fn set_error(&self, error: EnhancementError) {
        *self.error.write().await = Some(error);
    }

    /// Make calls succeed again.
    pub async fn clear_error(&self) {
        *self.error.write().await = None;
    }

    pub async fn recorded_calls(&self) -> Vec<RecordedEnhancement> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl QueryEnhancer for MockQueryEnhancer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn enhance(
        &self,
        query: &str,
        context: &[Lesson],
    ) -> Result<Vec<Value>, EnhancementError> {
        self.calls.write().await.push(RecordedEnhancement {
            query: query.to_string(),
            context_ids: context.iter().map(|l| l.id).collect(),
        });

        if let Some(error) = self.error.read().await.as_ref() {
            return Err(error.clone());
        }
        Ok(self.response.read().await.clone())
    }
}
