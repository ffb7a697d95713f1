use crate::LayoutError;
use crate::algorithms::pagination::{EPSILON, check_fit};
use crate::config::RenderConfig;
use issp_idf::Banner;
use issp_render_core::{DrawingSurface, ImageData, RectPaint, Stroke, TextFrame, TextStyle};
use issp_types::{Point, Rect, Size};
use log::{debug, warn};

/// Current render position. `y` grows downward from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page_index: usize,
    pub y: f32,
    pub left: f32,
    pub content_width: f32,
    /// First y below the banner on the current page.
    pub content_top: f32,
    /// Lowest y content may reach.
    pub bottom_limit: f32,
}

impl Cursor {
    pub fn right(&self) -> f32 {
        self.left + self.content_width
    }

    pub fn available_height(&self) -> f32 {
        (self.bottom_limit - self.y).max(0.0)
    }

    pub fn is_at_page_top(&self) -> bool {
        (self.y - self.content_top).abs() < EPSILON
    }
}

/// Cursor & pagination controller for a single document render.
///
/// Owns the cursor and the surface handle for the duration of one render.
/// Every atomic drawing step calls [`ensure_space`](Self::ensure_space)
/// first; a break adds a page, redraws the banner and moves the cursor below
/// it.
pub struct PageController<'a> {
    surface: &'a mut dyn DrawingSurface,
    config: &'a RenderConfig,
    banner: Banner,
    cursor: Cursor,
    page_breaks: usize,
}

impl<'a> PageController<'a> {
    pub fn new(surface: &'a mut dyn DrawingSurface, config: &'a RenderConfig, banner: Banner) -> Self {
        let page = surface.page_size();
        let margins = surface.margins();
        let cursor = Cursor {
            page_index: 0,
            y: margins.top,
            left: margins.left,
            content_width: page.width - margins.horizontal(),
            content_top: margins.top,
            bottom_limit: page.height - margins.bottom,
        };
        Self {
            surface,
            config,
            banner,
            cursor,
            page_breaks: 0,
        }
    }

    /// Opens the first page.
    pub fn begin(&mut self) -> Result<(), LayoutError> {
        self.start_page(true)
    }

    /// Forced page break. Always redraws the banner.
    pub fn new_page(&mut self) -> Result<(), LayoutError> {
        self.page_breaks += 1;
        self.start_page(false)
    }

    fn start_page(&mut self, first: bool) -> Result<(), LayoutError> {
        self.surface.add_page()?;
        self.cursor.page_index = self.surface.page_count().saturating_sub(1);
        self.cursor.y = self.surface.margins().top;
        let below_banner = self.draw_banner(first)?;
        self.cursor.content_top = below_banner;
        self.cursor.y = below_banner;
        debug!("Started page {} (content top {:.2})", self.cursor.page_index + 1, below_banner);
        Ok(())
    }

    /// Centered title, muted subtitle and a rule. Returns the first y below it.
    fn draw_banner(&mut self, first: bool) -> Result<f32, LayoutError> {
        let config = self.config;
        let left = self.cursor.left;
        let width = self.cursor.content_width;
        let mut y = self.cursor.y;

        let title_style = config.banner_title_style(first);
        if !self.banner.title.trim().is_empty() {
            let h = self.surface.measure_text_height(&self.banner.title, width, &title_style);
            self.surface.draw_text(&self.banner.title, TextFrame::new(left, y, width), &title_style)?;
            y += h;
        }
        let subtitle_style = config.banner_subtitle_style();
        if !self.banner.subtitle.trim().is_empty() {
            let h = self.surface.measure_text_height(&self.banner.subtitle, width, &subtitle_style);
            self.surface
                .draw_text(&self.banner.subtitle, TextFrame::new(left, y, width), &subtitle_style)?;
            y += h;
        }
        y += config.spacing.banner_gap / 2.0;
        self.surface.draw_line(
            Point::new(left, y),
            Point::new(left + width, y),
            &config.rule_stroke(),
        )?;
        Ok(y + config.spacing.banner_gap)
    }

    /// Height the banner takes, measured without drawing.
    fn banner_height(&self, first: bool) -> f32 {
        let width = self.cursor.content_width;
        let mut h = 0.0;
        if !self.banner.title.trim().is_empty() {
            h += self.surface.measure_text_height(
                &self.banner.title,
                width,
                &self.config.banner_title_style(first),
            );
        }
        if !self.banner.subtitle.trim().is_empty() {
            h += self.surface.measure_text_height(
                &self.banner.subtitle,
                width,
                &self.config.banner_subtitle_style(),
            );
        }
        h + self.config.spacing.banner_gap * 1.5
    }

    /// Breaks to a new page when `height` does not fit below the cursor.
    /// Returns whether a break happened.
    ///
    /// Never breaks at the top of a fresh page: a block taller than the
    /// content area is drawn there and must clamp itself.
    pub fn ensure_space(&mut self, height: f32) -> Result<bool, LayoutError> {
        let analysis = check_fit(self.cursor.y, height, self.cursor.bottom_limit);
        if !analysis.should_break {
            return Ok(false);
        }
        if self.cursor.is_at_page_top() {
            warn!(
                "Block of height {:.2} exceeds the content area ({:.2}) on page {}",
                height,
                analysis.remaining_height,
                self.cursor.page_index + 1
            );
            return Ok(false);
        }
        debug!(
            "Page break before block of height {:.2} ({:.2} left on page {})",
            height,
            analysis.remaining_height,
            self.cursor.page_index + 1
        );
        self.new_page()?;
        Ok(true)
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor.y += dy;
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn config(&self) -> &'a RenderConfig {
        self.config
    }

    pub fn page_breaks(&self) -> usize {
        self.page_breaks
    }

    /// Content height of the smallest page, the most any block can rely on.
    pub fn full_page_height(&self) -> f32 {
        let page = self.surface.page_size();
        let margins = self.surface.margins();
        let banner = self.banner_height(true).max(self.banner_height(false));
        (page.height - margins.vertical() - banner).max(0.0)
    }

    pub fn page_size(&self) -> Size {
        self.surface.page_size()
    }

    pub fn page_count(&self) -> usize {
        self.surface.page_count()
    }

    pub fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        self.surface.text_width(text, style)
    }

    pub fn line_height(&self, style: &TextStyle) -> f32 {
        self.surface.line_height(style)
    }

    pub fn wrap_text(&self, text: &str, width: f32, style: &TextStyle) -> Vec<String> {
        self.surface.wrap_text(text, width, style)
    }

    pub fn measure_text_height(&self, text: &str, width: f32, style: &TextStyle) -> f32 {
        self.surface.measure_text_height(text, width, style)
    }

    pub fn draw_text(&mut self, text: &str, frame: TextFrame, style: &TextStyle) -> Result<(), LayoutError> {
        Ok(self.surface.draw_text(text, frame, style)?)
    }

    pub fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), LayoutError> {
        Ok(self.surface.draw_line(from, to, stroke)?)
    }

    pub fn draw_rect(&mut self, rect: Rect, paint: &RectPaint) -> Result<(), LayoutError> {
        Ok(self.surface.draw_rect(rect, paint)?)
    }

    pub fn draw_image(&mut self, image: &ImageData<'_>, rect: Rect) -> Result<(), LayoutError> {
        Ok(self.surface.draw_image(image, rect)?)
    }

    /// Draws the page-number footer on every page once the total is known.
    pub fn draw_page_footers(&mut self) -> Result<(), LayoutError> {
        let footer = &self.config.footer;
        if !footer.page_numbers {
            return Ok(());
        }
        let total = self.surface.page_count();
        let style = self.config.footer_style();
        let page = self.surface.page_size();
        let margins = self.surface.margins();
        let line_height = self.surface.line_height(&style);
        let y = page.height - margins.bottom + ((margins.bottom - line_height) / 2.0).max(0.0);

        for index in 0..total {
            self.surface.switch_to_page(index)?;
            let text = footer.render(index + 1, total);
            self.surface
                .draw_text(&text, TextFrame::new(self.cursor.left, y, self.cursor.content_width), &style)?;
        }
        if total > 0 {
            self.surface.switch_to_page(self.cursor.page_index)?;
        }
        debug!("Drew page footers on {} pages", total);
        Ok(())
    }
}
