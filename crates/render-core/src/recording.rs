//! An in-memory backend that records every drawing instruction.
//!
//! Measurement uses the same Helvetica metrics as the PDF backend, so a
//! recorded layout paginates exactly like the real document.

use crate::error::RenderError;
use crate::metrics;
use crate::traits::DrawingSurface;
use crate::types::{ImageData, ImageFormat, PlacedLine, RectPaint, Stroke, TextFrame, TextStyle};
use issp_types::{Margins, Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    PageAdded {
        page: usize,
    },
    SwitchedPage {
        page: usize,
    },
    Text {
        page: usize,
        text: String,
        frame: TextFrame,
        style: TextStyle,
        lines: Vec<PlacedLine>,
    },
    Line {
        page: usize,
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Rect {
        page: usize,
        rect: Rect,
        paint: RectPaint,
    },
    Image {
        page: usize,
        rect: Rect,
        format: ImageFormat,
        pixel_size: (u32, u32),
    },
}

impl DrawOp {
    /// The page a drawing instruction landed on.
    pub fn page(&self) -> usize {
        match self {
            DrawOp::PageAdded { page }
            | DrawOp::SwitchedPage { page }
            | DrawOp::Text { page, .. }
            | DrawOp::Line { page, .. }
            | DrawOp::Rect { page, .. }
            | DrawOp::Image { page, .. } => *page,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    page_size: Size,
    margins: Margins,
    page_count: usize,
    current: Option<usize>,
    ops: Vec<DrawOp>,
    /// Fail every drawing call once this many operations have been recorded.
    fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn new(page_size: Size, margins: Margins) -> Self {
        Self {
            page_size,
            margins,
            page_count: 0,
            current: None,
            ops: Vec::new(),
            fail_after: None,
        }
    }

    /// A surface whose drawing calls start failing with an I/O error after
    /// `ops` instructions, mimicking a broken output stream.
    pub fn failing_after(mut self, ops: usize) -> Self {
        self.fail_after = Some(ops);
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn ops_on_page(&self, page: usize) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| op.page() == page)
    }

    /// Every drawn text block, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops.iter().filter_map(DrawOp::text).collect()
    }

    /// Every line segment as `(page, from, to)`.
    pub fn lines(&self) -> Vec<(usize, Point, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { page, from, to, .. } => Some((*page, *from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.ops
            .iter()
            .filter_map(DrawOp::text)
            .any(|t| t.contains(needle))
    }

    fn record(&mut self, build: impl FnOnce(usize) -> DrawOp) -> Result<(), RenderError> {
        if self.fail_after.is_some_and(|limit| self.ops.len() >= limit) {
            return Err(RenderError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "recording surface closed",
            )));
        }
        let page = self.current.ok_or(RenderError::NoPage)?;
        self.ops.push(build(page));
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn page_size(&self) -> Size {
        self.page_size
    }

    fn margins(&self) -> Margins {
        self.margins
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn current_page(&self) -> Option<usize> {
        self.current
    }

    fn add_page(&mut self) -> Result<(), RenderError> {
        let page = self.page_count;
        self.page_count += 1;
        self.current = Some(page);
        self.record(|page| DrawOp::PageAdded { page })
    }

    fn switch_to_page(&mut self, index: usize) -> Result<(), RenderError> {
        if index >= self.page_count {
            return Err(RenderError::PageOutOfRange {
                index,
                count: self.page_count,
            });
        }
        self.current = Some(index);
        self.record(|page| DrawOp::SwitchedPage { page })
    }

    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        metrics::text_width(text, style)
    }

    fn draw_text(
        &mut self,
        text: &str,
        frame: TextFrame,
        style: &TextStyle,
    ) -> Result<(), RenderError> {
        let lines = self.layout_text(text, frame, style);
        self.record(|page| DrawOp::Text {
            page,
            text: text.to_string(),
            frame,
            style: style.clone(),
            lines,
        })
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        let stroke = *stroke;
        self.record(|page| DrawOp::Line {
            page,
            from,
            to,
            stroke,
        })
    }

    fn draw_rect(&mut self, rect: Rect, paint: &RectPaint) -> Result<(), RenderError> {
        let paint = *paint;
        self.record(|page| DrawOp::Rect { page, rect, paint })
    }

    fn draw_image(&mut self, image: &ImageData<'_>, rect: Rect) -> Result<(), RenderError> {
        let format = image.format;
        let pixel_size = (image.pixel_width, image.pixel_height);
        self.record(|page| DrawOp::Image {
            page,
            rect,
            format,
            pixel_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Size::new(200.0, 300.0), Margins::all(20.0))
    }

    #[test]
    fn drawing_without_a_page_fails() {
        let mut s = surface();
        let err = s
            .draw_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), &Stroke::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::NoPage));
    }

    #[test]
    fn records_ops_per_page() {
        let mut s = surface();
        s.add_page().unwrap();
        s.draw_text("hello", TextFrame::new(20.0, 20.0, 100.0), &TextStyle::new(10.0))
            .unwrap();
        s.add_page().unwrap();
        s.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &RectPaint::default())
            .unwrap();

        assert_eq!(s.page_count(), 2);
        assert_eq!(s.ops_on_page(0).count(), 2);
        assert_eq!(s.ops_on_page(1).count(), 2);
        assert_eq!(s.texts(), ["hello"]);
    }

    #[test]
    fn switch_to_missing_page_is_an_error() {
        let mut s = surface();
        s.add_page().unwrap();
        assert!(matches!(
            s.switch_to_page(3),
            Err(RenderError::PageOutOfRange { index: 3, count: 1 })
        ));
        assert!(s.switch_to_page(0).is_ok());
    }

    #[test]
    fn clipped_text_is_truncated_with_ellipsis() {
        let mut s = surface();
        s.add_page().unwrap();
        let style = TextStyle::new(10.0);
        let frame = TextFrame::new(0.0, 0.0, 40.0).clipped(style.line_height());
        s.draw_text("a long sentence that wraps", frame, &style)
            .unwrap();

        let DrawOp::Text { lines, .. } = &s.ops()[1] else {
            panic!("expected text op");
        };
        assert_eq!(lines.len(), 1);
        assert!(lines[0].text.ends_with('…'));
        assert!(lines[0].width <= 40.0);
    }

    #[test]
    fn failing_surface_reports_io_error() {
        let mut s = surface().failing_after(1);
        s.add_page().unwrap();
        let err = s.add_page().unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn centered_lines_are_offset() {
        let s = surface();
        let style = TextStyle::new(10.0).aligned(crate::TextAlign::Center);
        let lines = s.layout_text("nn", TextFrame::new(0.0, 0.0, 100.0), &style);
        assert!((lines[0].x - (100.0 - 11.12) / 2.0).abs() < 1e-3);
    }
}
