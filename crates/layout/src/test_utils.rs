use crate::LayoutError;
use crate::config::RenderConfig;
use crate::controller::PageController;
use issp_idf::Banner;
use issp_render_core::{DrawOp, RecordingSurface};
use issp_types::{Margins, PageSize};

pub fn default_config() -> RenderConfig {
    RenderConfig::default()
}

/// A short page so a handful of rows forces a break.
pub fn short_page_config() -> RenderConfig {
    RenderConfig {
        page_size: PageSize::Custom {
            width: 400.0,
            height: 300.0,
        },
        margins: Margins::all(20.0),
        ..Default::default()
    }
}

pub fn banner() -> Banner {
    Banner {
        title: "Information Systems Strategic Plan".into(),
        subtitle: "ISSP 2024-2026".into(),
    }
}

pub fn recording_surface(config: &RenderConfig) -> RecordingSurface {
    let _ = env_logger::builder().is_test(true).try_init();
    RecordingSurface::new(config.page_dimensions(), config.margins)
}

/// Opens a page, runs `f` against a fresh controller and hands back the
/// recorded instructions with whatever `f` returned.
pub fn render_with<R>(
    config: &RenderConfig,
    f: impl FnOnce(&mut PageController<'_>) -> Result<R, LayoutError>,
) -> (RecordingSurface, R) {
    let mut surface = recording_surface(config);
    let result = {
        let mut pc = PageController::new(&mut surface, config, banner());
        pc.begin().expect("first page");
        f(&mut pc).expect("render")
    };
    (surface, result)
}

/// Text ops as `(page, text, y)`, skipping the banner.
pub fn body_texts(surface: &RecordingSurface) -> Vec<(usize, String, f32)> {
    let banner = banner();
    surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                page, text, frame, ..
            } if *text != banner.title && *text != banner.subtitle => {
                Some((*page, text.clone(), frame.y))
            }
            _ => None,
        })
        .collect()
}
