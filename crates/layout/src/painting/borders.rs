//! Stateless line, fill and cell-text primitives shared by the table
//! recipes. Table edges are stroked as individual segments so adjoining
//! cells never paint a shared edge twice.

use crate::LayoutError;
use crate::controller::PageController;
use issp_render_core::{RectPaint, Stroke, TextFrame, TextStyle};
use issp_types::{Color, Point, Rect};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
}

pub fn hline(pc: &mut PageController<'_>, x1: f32, x2: f32, y: f32, stroke: &Stroke) -> Result<(), LayoutError> {
    pc.draw_line(Point::new(x1, y), Point::new(x2, y), stroke)
}

pub fn vline(pc: &mut PageController<'_>, x: f32, y1: f32, y2: f32, stroke: &Stroke) -> Result<(), LayoutError> {
    pc.draw_line(Point::new(x, y1), Point::new(x, y2), stroke)
}

pub fn fill(pc: &mut PageController<'_>, rect: Rect, color: Color) -> Result<(), LayoutError> {
    pc.draw_rect(rect, &RectPaint::fill(color))
}

/// Draws `text` inside `cell` less `padding`, clipped with an ellipsis when
/// it overflows the cell height.
pub fn cell_text(
    pc: &mut PageController<'_>,
    text: &str,
    cell: Rect,
    padding: f32,
    style: &TextStyle,
    valign: VerticalAlign,
) -> Result<(), LayoutError> {
    if text.is_empty() {
        return Ok(());
    }
    let inner = cell.inset(padding);
    if inner.width <= 0.0 || inner.height <= 0.0 {
        return Ok(());
    }
    let y = match valign {
        VerticalAlign::Top => inner.y,
        VerticalAlign::Middle => {
            let text_height = pc.measure_text_height(text, inner.width, style).min(inner.height);
            inner.y + (inner.height - text_height) / 2.0
        }
    };
    let frame = TextFrame::new(inner.x, y, inner.width).clipped(inner.bottom() - y);
    pc.draw_text(text, frame, style)
}

/// Vertical separators at every edge in `edges`, spanning `y1..y2`.
pub fn column_rules(
    pc: &mut PageController<'_>,
    edges: impl IntoIterator<Item = f32>,
    y1: f32,
    y2: f32,
    stroke: &Stroke,
) -> Result<(), LayoutError> {
    for x in edges {
        vline(pc, x, y1, y2, stroke)?;
    }
    Ok(())
}
