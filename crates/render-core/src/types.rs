use issp_types::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Everything a backend needs to measure and draw a run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub weight: FontWeight,
    pub italic: bool,
    pub color: Color,
    pub align: TextAlign,
    /// Line height as a multiple of `font_size`.
    pub line_spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            weight: FontWeight::Regular,
            italic: false,
            color: Color::BLACK,
            align: TextAlign::Left,
            line_spacing: 1.2,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }
}

/// Where a block of text goes. `y` is the top of the first line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// When set, lines that do not fit are dropped and the last kept line
    /// ends with an ellipsis.
    pub max_height: Option<f32>,
}

impl TextFrame {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            x,
            y,
            width,
            max_height: None,
        }
    }

    pub fn clipped(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }
}

/// A single wrapped line with its final position (top-left of the line box).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 0.75,
            color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectPaint {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RectPaint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn stroke(stroke: Stroke) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Other,
}

/// An already validated raster image, borrowed from the caller's payload.
#[derive(Debug, Clone, Copy)]
pub struct ImageData<'a> {
    pub bytes: &'a [u8],
    pub format: ImageFormat,
    pub pixel_width: u32,
    pub pixel_height: u32,
}
