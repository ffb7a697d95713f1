use crate::LayoutError;
use crate::algorithms::pagination::line_chunks;
use crate::controller::PageController;
use crate::format::{NO_DATA, format_value, is_blank};
use issp_idf::Value;
use issp_render_core::{TextFrame, TextStyle};
use log::trace;

#[derive(Debug, Clone, Default)]
pub struct ParagraphOptions {
    /// Overrides the body style.
    pub style: Option<TextStyle>,
    /// Left indent from the content edge.
    pub indent: f32,
    /// Space after the paragraph. `None` uses the configured paragraph gap.
    pub gap_after: Option<f32>,
}

/// Draws `value` as a wrapped paragraph, or the "No data provided." notice
/// when it formats to the placeholder. Returns how far the cursor moved.
pub fn paragraph(
    pc: &mut PageController<'_>,
    value: &Value,
    options: &ParagraphOptions,
) -> Result<f32, LayoutError> {
    let config = pc.config();
    let (text, style) = if is_blank(value) {
        (NO_DATA.to_string(), config.notice_style())
    } else {
        let style = options.style.clone().unwrap_or_else(|| config.body_style());
        (format_value(value), style)
    };
    let height = flow_text(pc, &text, options.indent, &style)?;
    let gap = options.gap_after.unwrap_or(config.spacing.paragraph_gap);
    pc.advance(gap);
    Ok(height + gap)
}

/// Draws the muted "No data provided." line used by empty blocks.
pub fn notice(pc: &mut PageController<'_>, indent: f32) -> Result<f32, LayoutError> {
    let config = pc.config();
    let style = config.notice_style();
    let height = flow_text(pc, NO_DATA, indent, &style)?;
    pc.advance(config.spacing.paragraph_gap);
    Ok(height + config.spacing.paragraph_gap)
}

/// Wraps `text` to the content width less `indent`, reserves space and
/// draws it, advancing the cursor by the measured height.
///
/// Text that fits on a page is kept whole. Longer text flows across pages
/// in line chunks.
pub fn flow_text(
    pc: &mut PageController<'_>,
    text: &str,
    indent: f32,
    style: &TextStyle,
) -> Result<f32, LayoutError> {
    let cursor = pc.cursor();
    let x = cursor.left + indent;
    let width = (cursor.content_width - indent).max(1.0);
    let lines = pc.wrap_text(text, width, style);
    let line_height = pc.line_height(style);
    let height = lines.len() as f32 * line_height;
    if lines.is_empty() {
        return Ok(0.0);
    }

    if height <= pc.full_page_height() {
        pc.ensure_space(height)?;
        let y = pc.cursor().y;
        pc.draw_text(text, TextFrame::new(x, y, width), style)?;
        pc.advance(height);
        return Ok(height);
    }

    let chunks = line_chunks(
        lines.len(),
        line_height,
        pc.cursor().available_height(),
        pc.full_page_height(),
    );
    trace!("Flowing {} lines over {} chunks", lines.len(), chunks.len());
    let mut start = 0;
    for count in chunks {
        let chunk_height = count as f32 * line_height;
        pc.ensure_space(chunk_height)?;
        let y = pc.cursor().y;
        let chunk = lines[start..start + count].join("\n");
        pc.draw_text(&chunk, TextFrame::new(x, y, width), style)?;
        pc.advance(chunk_height);
        start += count;
    }
    Ok(height)
}
