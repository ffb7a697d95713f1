use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Image error: {0}")]
    Image(String),
    #[error("Page index {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
    #[error("No page has been started")]
    NoPage,
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
