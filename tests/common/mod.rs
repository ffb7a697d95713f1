pub mod fixtures;
pub mod pdf_assertions;

use issp_report::{Document, RecordingSurface, RenderConfig, RenderSummary, ReportGenerator, render_document};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based like the PDF page numbers.
    #[allow(dead_code)]
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Generate a PDF with the default configuration
#[allow(dead_code)]
pub fn generate_pdf(document: &Document) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    generate_pdf_with(&RenderConfig::default(), document)
}

#[allow(dead_code)]
pub fn generate_pdf_with(
    config: &RenderConfig,
    document: &Document,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let bytes = ReportGenerator::new(config.clone()).generate(document)?;
    GeneratedPdf::from_bytes(bytes)
}

/// Render into an instruction log instead of a PDF, for geometry checks.
#[allow(dead_code)]
pub fn record(
    config: &RenderConfig,
    document: &Document,
) -> Result<(RecordingSurface, RenderSummary), Box<dyn std::error::Error>> {
    let mut surface = RecordingSurface::new(config.page_dimensions(), config.margins);
    let summary = render_document(&mut surface, config, document)?;
    Ok((surface, summary))
}
