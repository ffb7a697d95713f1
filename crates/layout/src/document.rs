//! Section/document orchestrator: banner, part bands, section titles and
//! block dispatch, followed by the page-number pass.

use crate::LayoutError;
use crate::config::RenderConfig;
use crate::controller::PageController;
use crate::image_block::render_image_block;
use crate::layouts::{
    render_deployment, render_investment, render_label_value, render_matrix, render_numbered,
};
use crate::table::{GridOptions, TableOutcome, render_table};
use crate::text::{ListOptions, ParagraphOptions, bullet_item, key_value_list, notice, paragraph};
use issp_idf::{Block, Document, Part, Section};
use issp_render_core::{DrawingSurface, RectPaint, TextFrame};
use issp_types::Rect;
use log::{debug, info};

/// Totals for one document render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
    pub tables: usize,
    pub header_replays: usize,
}

impl RenderSummary {
    fn record_table(&mut self, outcome: TableOutcome) {
        self.tables += 1;
        self.header_replays += outcome.header_replays();
    }
}

/// Renders `document` onto `surface`.
///
/// Every part starts on a fresh page; the first reuses the opening page.
/// Sections flow on and only break when their content does not fit. Any
/// drawing failure aborts the render.
pub fn render_document(
    surface: &mut dyn DrawingSurface,
    config: &RenderConfig,
    document: &Document,
) -> Result<RenderSummary, LayoutError> {
    config.validate()?;
    let mut pc = PageController::new(surface, config, document.banner.clone());
    pc.begin()?;

    let mut summary = RenderSummary::default();
    for part in &document.parts {
        if !pc.cursor().is_at_page_top() {
            pc.new_page()?;
        }
        render_part(&mut pc, part, &mut summary)?;
    }

    pc.draw_page_footers()?;
    summary.pages = pc.page_count();
    info!(
        "Rendered {} parts on {} pages ({} tables, {} header replays)",
        document.parts.len(),
        summary.pages,
        summary.tables,
        summary.header_replays
    );
    Ok(summary)
}

fn render_part(pc: &mut PageController<'_>, part: &Part, summary: &mut RenderSummary) -> Result<(), LayoutError> {
    debug!("Part '{}' on page {}", part.title, pc.cursor().page_index + 1);
    if !part.title.trim().is_empty() {
        draw_part_band(pc, &part.title)?;
    }
    for section in &part.sections {
        render_section(pc, section, summary)?;
    }
    Ok(())
}

/// Filled band across the content width with the part title in bold.
fn draw_part_band(pc: &mut PageController<'_>, title: &str) -> Result<(), LayoutError> {
    let config = pc.config();
    let style = config.part_title_style();
    let padding = config.spacing.part_padding;
    let cursor = pc.cursor();
    let text_width = cursor.content_width - 2.0 * padding;
    let height = pc.measure_text_height(title, text_width, &style) + 2.0 * padding;

    pc.ensure_space(height)?;
    let y = pc.cursor().y;
    pc.draw_rect(
        Rect::new(cursor.left, y, cursor.content_width, height),
        &RectPaint::fill(config.colors.part_band),
    )?;
    pc.draw_text(title, TextFrame::new(cursor.left + padding, y + padding, text_width), &style)?;
    pc.advance(height + config.spacing.part_gap);
    Ok(())
}

fn render_section(pc: &mut PageController<'_>, section: &Section, summary: &mut RenderSummary) -> Result<(), LayoutError> {
    let config = pc.config();
    if !section.title.trim().is_empty() {
        let style = config.section_title_style();
        let width = pc.cursor().content_width;
        let title_height = pc.measure_text_height(&section.title, width, &style);
        let gap = config.spacing.section_title_gap;
        // Keep the title with at least one line of what follows.
        pc.ensure_space(title_height + gap + pc.line_height(&config.body_style()))?;
        let cursor = pc.cursor();
        pc.draw_text(&section.title, TextFrame::new(cursor.left, cursor.y, width), &style)?;
        pc.advance(title_height + gap);
    }

    if section.blocks.is_empty() {
        notice(pc, 0.0)?;
    }
    for block in &section.blocks {
        render_block(pc, block, summary)?;
    }
    pc.advance(config.spacing.section_gap);
    Ok(())
}

fn render_block(pc: &mut PageController<'_>, block: &Block, summary: &mut RenderSummary) -> Result<(), LayoutError> {
    match block {
        Block::Paragraph(value) => {
            paragraph(pc, value, &ParagraphOptions::default())?;
        }
        Block::Bullet { label, value } => {
            bullet_item(pc, label, value, &ListOptions::default())?;
        }
        Block::KeyValues(entries) => {
            key_value_list(pc, entries, &ListOptions::default())?;
        }
        Block::Table(table) => summary.record_table(render_table(pc, table, GridOptions::default())?),
        Block::LabelValue(rows) => summary.record_table(render_label_value(pc, rows)?),
        Block::Numbered(table) => summary.record_table(render_numbered(pc, table)?),
        Block::Matrix(matrix) => summary.record_table(render_matrix(pc, matrix)?),
        Block::Deployment(table) => summary.record_table(render_deployment(pc, table)?),
        Block::Investment(table) => summary.record_table(render_investment(pc, table)?),
        Block::Image(image) => {
            render_image_block(pc, image)?;
        }
    }
    Ok(())
}
