//! PDF export of lessons.

mod lopdf_renderer;
mod template;

pub use lopdf_renderer::LopdfRenderer;
pub use template::render_template;

use thiserror::Error;

/// PDF generation failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Encoding(String),

    #[error("PDF write failed: {0}")]
    Write(String),
}

/// Turns a title and body text into a PDF document.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, title: &str, body: &str) -> Result<Vec<u8>, RenderError>;
}
