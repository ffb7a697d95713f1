//! Image block renderer. Payloads are probed before any space is reserved;
//! anything that is not a decodable raster image degrades to a one-line
//! fallback drawn by the caller.

use crate::LayoutError;
use crate::controller::PageController;
use crate::text::{ParagraphOptions, paragraph};
use image::ImageReader;
use issp_idf::{ImageBlock, ImagePayload, Value};
use issp_render_core::{ImageData, ImageFormat};
use issp_types::{Rect, Size};
use log::{debug, warn};
use std::io::Cursor;

/// Format and pixel size of a payload that decodes as an image.
fn probe(payload: &ImagePayload) -> Option<(ImageFormat, u32, u32)> {
    if !payload.declares_image() || payload.bytes.is_empty() {
        return None;
    }
    let reader = ImageReader::new(Cursor::new(&payload.bytes))
        .with_guessed_format()
        .ok()?;
    let format = match reader.format()? {
        image::ImageFormat::Jpeg => ImageFormat::Jpeg,
        image::ImageFormat::Png => ImageFormat::Png,
        _ => ImageFormat::Other,
    };
    match reader.decode() {
        Ok(decoded) => Some((format, decoded.width(), decoded.height())),
        Err(e) => {
            warn!("Embedded {} payload could not be decoded: {}", payload.mime, e);
            None
        }
    }
}

/// Draws `payload` scaled to fit `bounds`, keeping its aspect ratio and
/// centred on the content width. Returns false, drawing nothing, when the
/// payload is absent or not a valid image.
pub fn render_embedded_image(
    pc: &mut PageController<'_>,
    payload: Option<&ImagePayload>,
    bounds: Size,
) -> Result<bool, LayoutError> {
    let Some(payload) = payload else {
        return Ok(false);
    };
    let Some((format, pixel_width, pixel_height)) = probe(payload) else {
        debug!("Skipping non-image payload ({})", payload.mime);
        return Ok(false);
    };

    let margin = pc.config().spacing.image_margin;
    let cursor = pc.cursor();
    let bounds = Size::new(
        bounds.width.min(cursor.content_width),
        bounds.height.min(pc.full_page_height() - margin),
    );
    let size = Size::new(pixel_width as f32, pixel_height as f32).fit_within(bounds);
    if size.width <= 0.0 || size.height <= 0.0 {
        return Ok(false);
    }

    pc.ensure_space(size.height + margin)?;
    let cursor = pc.cursor();
    let rect = Rect::new(
        cursor.left + (cursor.content_width - size.width) / 2.0,
        cursor.y,
        size.width,
        size.height,
    );
    let image = ImageData {
        bytes: &payload.bytes,
        format,
        pixel_width,
        pixel_height,
    };
    pc.draw_image(&image, rect)?;
    pc.advance(size.height + margin);
    Ok(true)
}

/// The line drawn when [`render_embedded_image`] returns false.
pub fn image_fallback_text(label: &str, payload: Option<&ImagePayload>) -> String {
    match payload {
        Some(_) => format!("{label} uploaded (non-image file)"),
        None => format!("No {label} uploaded"),
    }
}

/// Draws the image, or its fallback line. Returns whether the image was drawn.
pub fn render_image_block(pc: &mut PageController<'_>, block: &ImageBlock) -> Result<bool, LayoutError> {
    let config = pc.config();
    let bounds = block.max_size.unwrap_or_else(|| {
        Size::new(
            config.image.max_width.unwrap_or(pc.cursor().content_width),
            config.image.max_height,
        )
    });
    let payload = block.payload.as_ref();
    if render_embedded_image(pc, payload, bounds)? {
        return Ok(true);
    }
    let text = image_fallback_text(&block.label, payload);
    let options = ParagraphOptions {
        style: Some(config.notice_style()),
        ..Default::default()
    };
    paragraph(pc, &Value::String(text), &options)?;
    Ok(false)
}
