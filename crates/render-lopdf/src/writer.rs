use crate::images::EmbeddedImage;
use issp_render_core::RenderError;
use issp_types::Size;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::io::Write;

/// Resource names of the registered standard fonts, in registration order.
pub(crate) const FONTS: [(&str, &str); 4] = [
    ("F1", "Helvetica"),
    ("F2", "Helvetica-Bold"),
    ("F3", "Helvetica-Oblique"),
    ("F4", "Helvetica-BoldOblique"),
];

pub(crate) fn font_resource(base_font: &str) -> &'static str {
    FONTS
        .iter()
        .find(|(_, name)| *name == base_font)
        .map(|(res, _)| *res)
        .unwrap_or("F1")
}

/// Assembles buffered pages into a complete PDF document.
pub(crate) struct PdfAssembler<'a> {
    pub title: Option<&'a str>,
    pub page_size: Size,
    pub pages: Vec<Vec<Operation>>,
    pub images: &'a [EmbeddedImage],
}

impl PdfAssembler<'_> {
    pub fn write<W: Write>(self, writer: &mut W) -> Result<(), RenderError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for (res, base_font) in FONTS {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font,
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(res, font_id);
        }

        let mut xobject_dict = Dictionary::new();
        for image in self.images {
            let image_id = doc.add_object(image.stream.clone());
            xobject_dict.set(image.name.as_bytes(), image_id);
        }

        let resources_id = doc.add_object(dictionary! {
            "Font" => font_dict,
            "XObject" => xobject_dict,
        });

        let media_box: Vec<Object> = vec![
            0.0.into(),
            0.0.into(),
            self.page_size.width.into(),
            self.page_size.height.into(),
        ];

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let encoded = Content { operations }
                .encode()
                .map_err(|e| RenderError::Pdf(e.to_string()))?;
            let mut stream = Stream::new(dictionary! {}, encoded);
            if let Err(e) = stream.compress() {
                log::debug!("Content stream left uncompressed: {}", e);
            }
            let content_id = doc.add_object(stream);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(issp_render_core::utils::encode_win_ansi(title)),
                "Producer" => Object::string_literal("issp-report"),
            });
            doc.trailer.set("Info", info_id);
        }

        doc.save_to(writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(())
    }
}
