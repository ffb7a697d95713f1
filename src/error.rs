use issp_layout::LayoutError;
use issp_render_core::RenderError;
use thiserror::Error;

/// Errors surfaced by report generation. Missing or malformed record data is
/// never one of them; it renders as placeholders and fallback lines.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
