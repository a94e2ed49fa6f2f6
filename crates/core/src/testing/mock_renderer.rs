//! Mock PDF renderer for testing.

use std::sync::Mutex;

use crate::pdf::{PdfRenderer, RenderError};

/// Records rendered (title, body) pairs and returns a stub document,
/// or always fails when built with [`MockPdfRenderer::failing`].
#[derive(Debug, Default)]
pub struct MockPdfRenderer {
    fail: bool,
    rendered: Mutex<Vec<(String, String)>>,
}

impl MockPdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn rendered(&self) -> Vec<(String, String)> {
        self.rendered.lock().unwrap().clone()
    }
}

impl PdfRenderer for MockPdfRenderer {
    fn render(&self, title: &str, body: &str) -> Result<Vec<u8>, RenderError> {
        if self.fail {
            return Err(RenderError::Encoding("mock renderer failure".to_string()));
        }
        self.rendered
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(b"%PDF-1.5\n%mock\n".to_vec())
    }
}
