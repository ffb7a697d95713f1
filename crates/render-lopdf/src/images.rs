use image::{ColorType, DynamicImage};
use issp_render_core::{ImageData, ImageFormat, RenderError};
use lopdf::{Stream, dictionary};

/// An image XObject ready to be written, with its resource name.
#[derive(Debug, Clone)]
pub(crate) struct EmbeddedImage {
    pub name: String,
    pub stream: Stream,
}

/// Builds an image XObject. Baseline RGB and grayscale JPEGs are embedded
/// as-is; anything else is decoded and stored as Flate-compressed RGB with
/// transparency flattened onto white.
pub(crate) fn embed_image(name: String, data: &ImageData<'_>) -> Result<EmbeddedImage, RenderError> {
    let decoded = image::load_from_memory(data.bytes)
        .map_err(|e| RenderError::Image(e.to_string()))?;
    let (width, height) = (decoded.width() as i64, decoded.height() as i64);

    let passthrough_space = match (data.format, decoded.color()) {
        (ImageFormat::Jpeg, ColorType::Rgb8) => Some("DeviceRGB"),
        (ImageFormat::Jpeg, ColorType::L8) => Some("DeviceGray"),
        _ => None,
    };

    let stream = if let Some(color_space) = passthrough_space {
        Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => color_space,
                "BitsPerComponent" => 8_i64,
                "Filter" => "DCTDecode",
            },
            data.bytes.to_vec(),
        )
    } else {
        let mut stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            },
            flatten_to_rgb(&decoded),
        );
        stream
            .compress()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        stream
    };

    Ok(EmbeddedImage { name, stream })
}

fn flatten_to_rgb(image: &DynamicImage) -> Vec<u8> {
    if !image.color().has_alpha() {
        return image.to_rgb8().into_raw();
    }
    let rgba = image.to_rgba8();
    let mut out = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.pixels() {
        let alpha = px[3] as u32;
        for channel in &px.0[..3] {
            let blended = (*channel as u32 * alpha + 255 * (255 - alpha)) / 255;
            out.push(blended as u8);
        }
    }
    out
}
