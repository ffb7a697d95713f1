use crate::images::{EmbeddedImage, embed_image};
use crate::writer::{PdfAssembler, font_resource};
use issp_render_core::utils::{encode_win_ansi, flip_y, styled_font_name};
use issp_render_core::{
    DrawingSurface, ImageData, RectPaint, RenderError, Stroke, TextFrame, TextStyle, metrics,
};
use issp_types::{Margins, Point, Rect, Size};
use lopdf::Object;
use lopdf::content::Operation;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Write;

/// A [`DrawingSurface`] that produces a PDF using the standard Helvetica
/// fonts.
pub struct LopdfSurface {
    page_size: Size,
    margins: Margins,
    title: Option<String>,
    pages: Vec<Vec<Operation>>,
    current: Option<usize>,
    images: Vec<EmbeddedImage>,
    /// Content hash -> XObject name, so a repeated image is embedded once.
    image_names: HashMap<u64, String>,
}

impl LopdfSurface {
    pub fn new(page_size: Size, margins: Margins) -> Self {
        Self {
            page_size,
            margins,
            title: None,
            pages: Vec::new(),
            current: None,
            images: Vec::new(),
            image_names: HashMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Encodes every buffered page and returns the PDF bytes.
    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        self.finish_into(&mut buffer)?;
        Ok(buffer)
    }

    /// Encodes every buffered page into `writer`.
    pub fn finish_into<W: Write>(self, writer: &mut W) -> Result<(), RenderError> {
        if self.pages.is_empty() {
            return Err(RenderError::NoPage);
        }
        log::debug!(
            "Encoding PDF: {} pages, {} images",
            self.pages.len(),
            self.images.len()
        );
        PdfAssembler {
            title: self.title.as_deref(),
            page_size: self.page_size,
            pages: self.pages,
            images: &self.images,
        }
        .write(writer)
    }

    fn page_ops(&mut self) -> Result<&mut Vec<Operation>, RenderError> {
        let index = self.current.ok_or(RenderError::NoPage)?;
        let count = self.pages.len();
        self.pages
            .get_mut(index)
            .ok_or(RenderError::PageOutOfRange { index, count })
    }

    fn image_name(&mut self, image: &ImageData<'_>) -> Result<String, RenderError> {
        let mut hasher = DefaultHasher::new();
        image.bytes.hash(&mut hasher);
        let key = hasher.finish();
        if let Some(name) = self.image_names.get(&key) {
            return Ok(name.clone());
        }

        let name = format!("Im{}", self.images.len() + 1);
        let embedded = embed_image(name.clone(), image)?;
        self.images.push(embedded);
        self.image_names.insert(key, name.clone());
        Ok(name)
    }
}

fn color_operands(color: &issp_types::Color) -> Vec<Object> {
    let (r, g, b) = color.to_unit();
    vec![r.into(), g.into(), b.into()]
}

impl DrawingSurface for LopdfSurface {
    fn page_size(&self) -> Size {
        self.page_size
    }

    fn margins(&self) -> Margins {
        self.margins
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&self) -> Option<usize> {
        self.current
    }

    fn add_page(&mut self) -> Result<(), RenderError> {
        self.pages.push(Vec::new());
        self.current = Some(self.pages.len() - 1);
        Ok(())
    }

    fn switch_to_page(&mut self, index: usize) -> Result<(), RenderError> {
        if index >= self.pages.len() {
            return Err(RenderError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = Some(index);
        Ok(())
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
        if lines.iter().all(|l| l.text.is_empty()) {
            return Ok(());
        }

        let page_height = self.page_size.height;
        let line_height = self.line_height(style);
        let size = style.font_size;
        let font = font_resource(styled_font_name(style.weight, style.italic));

        let ops = self.page_ops()?;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), size.into()],
        ));
        ops.push(Operation::new("rg", color_operands(&style.color)));
        for line in lines.iter().filter(|l| !l.text.is_empty()) {
            let baseline = line.y + (line_height - size) / 2.0 + size * 0.8;
            ops.push(Operation::new(
                "Tm",
                vec![
                    1.0.into(),
                    0.0.into(),
                    0.0.into(),
                    1.0.into(),
                    line.x.into(),
                    flip_y(baseline, page_height).into(),
                ],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(&line.text))],
            ));
        }
        ops.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        let page_height = self.page_size.height;
        let ops = self.page_ops()?;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("w", vec![stroke.width.into()]));
        ops.push(Operation::new("RG", color_operands(&stroke.color)));
        ops.push(Operation::new(
            "m",
            vec![from.x.into(), flip_y(from.y, page_height).into()],
        ));
        ops.push(Operation::new(
            "l",
            vec![to.x.into(), flip_y(to.y, page_height).into()],
        ));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, paint: &RectPaint) -> Result<(), RenderError> {
        let paint_op = match (paint.fill.is_some(), paint.stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            (false, true) => "S",
            (false, false) => return Ok(()),
        };
        let page_height = self.page_size.height;
        let ops = self.page_ops()?;
        ops.push(Operation::new("q", vec![]));
        if let Some(fill) = &paint.fill {
            ops.push(Operation::new("rg", color_operands(fill)));
        }
        if let Some(stroke) = &paint.stroke {
            ops.push(Operation::new("w", vec![stroke.width.into()]));
            ops.push(Operation::new("RG", color_operands(&stroke.color)));
        }
        ops.push(Operation::new(
            "re",
            vec![
                rect.x.into(),
                flip_y(rect.bottom(), page_height).into(),
                rect.width.into(),
                rect.height.into(),
            ],
        ));
        ops.push(Operation::new(paint_op, vec![]));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn draw_image(&mut self, image: &ImageData<'_>, rect: Rect) -> Result<(), RenderError> {
        let name = self.image_name(image)?;
        let page_height = self.page_size.height;
        let ops = self.page_ops()?;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                rect.width.into(),
                0.0.into(),
                0.0.into(),
                rect.height.into(),
                rect.x.into(),
                flip_y(rect.bottom(), page_height).into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }
}
