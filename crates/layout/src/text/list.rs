use super::paragraph::{flow_text, notice};
use crate::LayoutError;
use crate::controller::PageController;
use crate::format::{NO_DATA, format_key_label, format_value, is_blank};
use issp_idf::{KeyValue, Value};
use issp_render_core::TextFrame;

#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Left indent of the label from the content edge.
    pub indent: f32,
    /// Glyph drawn before each label, if any.
    pub bullet: Option<char>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            indent: 0.0,
            bullet: Some('•'),
        }
    }
}

impl ListOptions {
    fn decorate(&self, label: &str) -> String {
        match self.bullet {
            Some(glyph) => format!("{glyph} {label}"),
            None => label.to_string(),
        }
    }
}

/// A bold label line followed by an indented body, or the "No data
/// provided." line when the value is blank. Always draws something.
pub fn bullet_item(
    pc: &mut PageController<'_>,
    label: &str,
    value: &Value,
    options: &ListOptions,
) -> Result<f32, LayoutError> {
    let config = pc.config();
    let label_style = config.label_style();
    let (body, body_style) = if is_blank(value) {
        (NO_DATA.to_string(), config.notice_style())
    } else {
        (format_value(value), config.body_style())
    };
    let label_text = options.decorate(label);
    let body_indent = options.indent + config.spacing.bullet_indent;
    let width = pc.cursor().content_width;
    let line_gap = config.spacing.list_line_gap;

    let label_height = pc.measure_text_height(&label_text, width - options.indent, &label_style);
    let body_height = pc.measure_text_height(&body, width - body_indent, &body_style);
    let together = label_height + line_gap + body_height;
    // Keep the label with its whole body when possible, else with one line.
    if together <= pc.full_page_height() {
        pc.ensure_space(together)?;
    } else {
        pc.ensure_space(label_height + line_gap + pc.line_height(&body_style))?;
    }

    let start = pc.cursor().y;
    flow_text(pc, &label_text, options.indent, &label_style)?;
    pc.advance(line_gap);
    flow_text(pc, &body, body_indent, &body_style)?;
    pc.advance(config.spacing.paragraph_gap);
    Ok(moved_since(pc, start))
}

/// Inline `Label: value` pairs with a hanging value column. Entries are
/// separated by the list line gap and the list is followed by the larger
/// list end gap.
pub fn key_value_list(
    pc: &mut PageController<'_>,
    entries: &[KeyValue],
    options: &ListOptions,
) -> Result<f32, LayoutError> {
    if entries.is_empty() {
        return notice(pc, options.indent);
    }
    let config = pc.config();
    let label_style = config.label_style();
    let value_style = config.body_style();
    let start = pc.cursor().y;

    for (i, entry) in entries.iter().enumerate() {
        let cursor = pc.cursor();
        let x = cursor.left + options.indent;
        let width = cursor.content_width - options.indent;
        let label = entry
            .label
            .clone()
            .unwrap_or_else(|| format_key_label(&entry.key));
        let label_text = format!("{}: ", options.decorate(&label));
        let value = format_value(&entry.value);

        let label_width = pc.text_width(&label_text, &label_style);
        // A label wider than half the line pushes the value below it.
        let (value_x, value_width, value_offset) = if label_width <= width / 2.0 {
            (x + label_width, width - label_width, 0.0)
        } else {
            let label_height = pc.measure_text_height(&label_text, width, &label_style);
            (x + config.spacing.bullet_indent, width - config.spacing.bullet_indent, label_height)
        };
        let label_height = if value_offset > 0.0 {
            value_offset
        } else {
            pc.line_height(&label_style)
        };
        let value_height = value_offset + pc.measure_text_height(&value, value_width, &value_style);
        let height = label_height.max(value_height).min(pc.full_page_height());

        pc.ensure_space(height)?;
        let y = pc.cursor().y;
        pc.draw_text(&label_text, TextFrame::new(x, y, width).clipped(height), &label_style)?;
        pc.draw_text(
            &value,
            TextFrame::new(value_x, y + value_offset, value_width).clipped(height - value_offset),
            &value_style,
        )?;
        pc.advance(height);

        let gap = if i + 1 == entries.len() {
            config.spacing.list_end_gap
        } else {
            config.spacing.list_line_gap
        };
        pc.advance(gap);
    }
    Ok(moved_since(pc, start))
}

/// Distance the cursor travelled since `start`, counting any page breaks
/// as the content that landed on the new page.
fn moved_since(pc: &PageController<'_>, start: f32) -> f32 {
    let cursor = pc.cursor();
    if cursor.y >= start {
        cursor.y - start
    } else {
        cursor.y - cursor.content_top
    }
}
