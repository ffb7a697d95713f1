use crate::error::RenderError;
use crate::types::{ImageData, PlacedLine, RectPaint, Stroke, TextAlign, TextFrame, TextStyle};
use crate::wrap;
use issp_types::{Margins, Point, Rect, Size};

/// The low-level drawing primitives the layout engine renders through.
///
/// Coordinates are in points with the origin at the top-left corner of the
/// page and `y` growing downward; backends flip to their own space. Text
/// measurement never draws, so callers can size a block before reserving
/// space for it.
pub trait DrawingSurface {
    fn page_size(&self) -> Size;

    fn margins(&self) -> Margins;

    fn page_count(&self) -> usize;

    /// Index of the page drawing calls currently target.
    fn current_page(&self) -> Option<usize>;

    /// Appends a page and makes it current.
    fn add_page(&mut self) -> Result<(), RenderError>;

    /// Makes an existing page current again, e.g. for footers drawn once the
    /// total page count is known.
    fn switch_to_page(&mut self, index: usize) -> Result<(), RenderError>;

    fn text_width(&self, text: &str, style: &TextStyle) -> f32;

    fn line_height(&self, style: &TextStyle) -> f32 {
        style.line_height()
    }

    fn wrap_text(&self, text: &str, width: f32, style: &TextStyle) -> Vec<String> {
        wrap::wrap_lines(text, width, |s| self.text_width(s, style))
    }

    /// Height `text` occupies when wrapped to `width`.
    fn measure_text_height(&self, text: &str, width: f32, style: &TextStyle) -> f32 {
        self.wrap_text(text, width, style).len() as f32 * self.line_height(style)
    }

    /// Wraps, truncates and aligns `text` inside `frame`.
    fn layout_text(&self, text: &str, frame: TextFrame, style: &TextStyle) -> Vec<PlacedLine> {
        let line_height = self.line_height(style);
        let mut lines = self.wrap_text(text, frame.width, style);
        if let Some(max_height) = frame.max_height {
            let max_lines = ((max_height + 0.01) / line_height).floor().max(0.0) as usize;
            lines = wrap::fit_lines(lines, max_lines, frame.width, |s| self.text_width(s, style));
        }

        lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let width = self.text_width(&text, style);
                let x = match style.align {
                    TextAlign::Left => frame.x,
                    TextAlign::Center => frame.x + (frame.width - width) / 2.0,
                    TextAlign::Right => frame.x + frame.width - width,
                };
                PlacedLine {
                    text,
                    x,
                    y: frame.y + i as f32 * line_height,
                    width,
                }
            })
            .collect()
    }

    fn draw_text(&mut self, text: &str, frame: TextFrame, style: &TextStyle)
    -> Result<(), RenderError>;

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError>;

    fn draw_rect(&mut self, rect: Rect, paint: &RectPaint) -> Result<(), RenderError>;

    /// Draws `image` stretched to `rect`; callers fit the aspect ratio.
    fn draw_image(&mut self, image: &ImageData<'_>, rect: Rect) -> Result<(), RenderError>;
}
