use crate::error::ReportError;
use issp_idf::Document;
use issp_layout::{RenderConfig, RenderSummary, render_document};
use issp_render_lopdf::LopdfSurface;
use log::info;
use std::io::Write;

/// Renders documents to PDF with one configuration.
///
/// Each call builds its own surface and controller, so a generator can be
/// shared between concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: RenderConfig,
}

impl ReportGenerator {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Configuration from camelCase JSON, validated.
    pub fn from_config_json(json: &str) -> Result<Self, ReportError> {
        let config = RenderConfig::from_json(json)?;
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The finished PDF. Nothing is returned unless the whole document and
    /// the encoder succeeded.
    pub fn generate(&self, document: &Document) -> Result<Vec<u8>, ReportError> {
        let mut bytes = Vec::new();
        self.generate_to(document, &mut bytes)?;
        Ok(bytes)
    }

    /// Renders the whole document before the first byte is written to
    /// `writer`.
    pub fn generate_to<W: Write>(&self, document: &Document, writer: &mut W) -> Result<RenderSummary, ReportError> {
        let mut surface = LopdfSurface::new(self.config.page_dimensions(), self.config.margins)
            .with_title(document.banner.title.clone());
        let summary = render_document(&mut surface, &self.config, document)?;
        surface.finish_into(writer)?;
        info!("Generated PDF with {} pages", summary.pages);
        Ok(summary)
    }
}
