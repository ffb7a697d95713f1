use crate::LayoutError;
use issp_render_core::{Stroke, TextAlign, TextStyle};
use issp_types::{Color, Margins, PageSize, Size};
use serde::{Deserialize, Serialize};

/// Every layout constant of a render: page geometry, type sizes, colours and
/// spacing. Threaded through the controller so concurrent renders with
/// different styling never share state.
///
/// Deserialises from camelCase JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    pub fonts: FontSizes,
    pub colors: Palette,
    pub spacing: Spacing,
    pub table: TableDefaults,
    pub image: ImageDefaults,
    pub footer: FooterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSizes {
    pub banner_title: f32,
    /// The first page carries a slightly larger banner title.
    pub banner_title_first_page: f32,
    pub banner_subtitle: f32,
    pub part_title: f32,
    pub section_title: f32,
    pub body: f32,
    pub table: f32,
    pub table_header: f32,
    pub small: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            banner_title: 13.0,
            banner_title_first_page: 15.0,
            banner_subtitle: 9.0,
            part_title: 12.0,
            section_title: 11.0,
            body: 10.0,
            table: 9.0,
            table_header: 9.0,
            small: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub rule: Color,
    pub part_band: Color,
    pub part_band_text: Color,
    pub header_background: Color,
    pub border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::BLACK,
            muted: Color::gray(0x55),
            rule: Color::gray(0x44),
            part_band: Color::rgb(0x1f, 0x3a, 0x5f),
            part_band_text: Color::WHITE,
            header_background: Color::rgb(0xe6, 0xeb, 0xf2),
            border: Color::gray(0x33),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spacing {
    pub banner_gap: f32,
    pub part_padding: f32,
    pub part_gap: f32,
    pub section_title_gap: f32,
    pub section_gap: f32,
    pub paragraph_gap: f32,
    pub list_line_gap: f32,
    pub list_end_gap: f32,
    pub bullet_indent: f32,
    pub image_margin: f32,
    pub table_gap: f32,
    pub border_width: f32,
    pub rule_width: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            banner_gap: 8.0,
            part_padding: 6.0,
            part_gap: 12.0,
            section_title_gap: 4.0,
            section_gap: 12.0,
            paragraph_gap: 6.0,
            list_line_gap: 3.0,
            list_end_gap: 10.0,
            bullet_indent: 14.0,
            image_margin: 8.0,
            table_gap: 10.0,
            border_width: 0.75,
            rule_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableDefaults {
    pub cell_padding: f32,
    /// Fixed row height for grid tables. `None` sizes rows from content.
    pub row_height: Option<f32>,
    pub min_row_height: f32,
    pub label_ratio: f32,
    pub sub_label_ratio: f32,
    pub label_row_height: f32,
    pub sub_row_height: f32,
    pub numbered_ratios: [f32; 3],
    pub deployment_min_rows: usize,
    pub deployment_min_row_height: f32,
}

impl Default for TableDefaults {
    fn default() -> Self {
        Self {
            cell_padding: 4.0,
            row_height: None,
            min_row_height: 18.0,
            label_ratio: 0.35,
            sub_label_ratio: 0.4,
            label_row_height: 20.0,
            sub_row_height: 20.0,
            numbered_ratios: [0.08, 0.42, 0.5],
            deployment_min_rows: 7,
            deployment_min_row_height: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageDefaults {
    /// Width of the default image box. `None` uses the content width.
    pub max_width: Option<f32>,
    pub max_height: f32,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: 220.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterConfig {
    pub page_numbers: bool,
    /// `%p` is replaced with the page number, `%t` with the page total.
    pub template: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            page_numbers: true,
            template: "Page %p of %t".to_string(),
        }
    }
}

impl FooterConfig {
    pub fn render(&self, page: usize, total: usize) -> String {
        self.template
            .replace("%p", &page.to_string())
            .replace("%t", &total.to_string())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margins: Margins::default(),
            fonts: FontSizes::default(),
            colors: Palette::default(),
            spacing: Spacing::default(),
            table: TableDefaults::default(),
            image: ImageDefaults::default(),
            footer: FooterConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn page_dimensions(&self) -> Size {
        self.page_size.dimensions()
    }

    /// Rejects geometry that leaves no room to draw.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let page = self.page_dimensions();
        if page.width <= 0.0 || page.height <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "page size must be positive, got {}x{}",
                page.width, page.height
            )));
        }
        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| *v < 0.0) {
            return Err(LayoutError::InvalidConfig("margins must not be negative".into()));
        }
        if page.width - m.horizontal() <= 0.0 || page.height - m.vertical() <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "margins leave no content area".into(),
            ));
        }
        let f = &self.fonts;
        let sizes = [
            f.banner_title,
            f.banner_title_first_page,
            f.banner_subtitle,
            f.part_title,
            f.section_title,
            f.body,
            f.table,
            f.table_header,
            f.small,
        ];
        if sizes.iter().any(|s| *s <= 0.0) {
            return Err(LayoutError::InvalidConfig("font sizes must be positive".into()));
        }
        self.validate_table()?;

        // Banner plus one header and one row must fit below the banner.
        let banner = self.banner_title_style(true).line_height()
            + self.banner_subtitle_style().line_height()
            + self.spacing.banner_gap * 1.5;
        let room = page.height - m.vertical() - banner;
        let smallest_block = self.table_header_style().line_height()
            + self.table.min_row_height
            + self.table.cell_padding * 2.0;
        if room < smallest_block {
            return Err(LayoutError::InvalidConfig(format!(
                "banner leaves {room:.1}pt of content height, need at least {smallest_block:.1}pt"
            )));
        }
        Ok(())
    }

    fn validate_table(&self) -> Result<(), LayoutError> {
        let t = &self.table;
        for (name, ratio) in [("labelRatio", t.label_ratio), ("subLabelRatio", t.sub_label_ratio)] {
            if !(ratio > 0.0 && ratio < 1.0) {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be between 0 and 1, got {ratio}"
                )));
            }
        }
        let ratios = &t.numbered_ratios;
        let sum: f32 = ratios.iter().sum();
        if ratios.iter().any(|r| !(*r > 0.0)) || (sum - 1.0).abs() > 0.01 {
            return Err(LayoutError::InvalidConfig(format!(
                "numberedRatios must be positive and sum to 1.0, got {ratios:?}"
            )));
        }
        if t.min_row_height <= 0.0 || t.cell_padding < 0.0 {
            return Err(LayoutError::InvalidConfig(
                "table row height must be positive and padding not negative".into(),
            ));
        }
        Ok(())
    }

    pub fn body_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.body).with_color(self.colors.text)
    }

    pub fn label_style(&self) -> TextStyle {
        self.body_style().bold()
    }

    /// Style of the "No data provided." notice.
    pub fn notice_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.body)
            .italic()
            .with_color(self.colors.muted)
    }

    pub fn table_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.table).with_color(self.colors.text)
    }

    pub fn table_header_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.table_header)
            .bold()
            .with_color(self.colors.text)
    }

    pub fn small_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.small)
            .italic()
            .with_color(self.colors.muted)
    }

    pub fn section_title_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.section_title)
            .bold()
            .with_color(self.colors.text)
    }

    pub fn part_title_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.part_title)
            .bold()
            .with_color(self.colors.part_band_text)
    }

    pub fn banner_title_style(&self, first_page: bool) -> TextStyle {
        let size = if first_page {
            self.fonts.banner_title_first_page
        } else {
            self.fonts.banner_title
        };
        TextStyle::new(size)
            .bold()
            .with_color(self.colors.text)
            .aligned(TextAlign::Center)
    }

    pub fn banner_subtitle_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.banner_subtitle)
            .with_color(self.colors.muted)
            .aligned(TextAlign::Center)
    }

    pub fn footer_style(&self) -> TextStyle {
        TextStyle::new(self.fonts.small)
            .with_color(self.colors.muted)
            .aligned(TextAlign::Center)
    }

    pub fn border_stroke(&self) -> Stroke {
        Stroke {
            width: self.spacing.border_width,
            color: self.colors.border,
        }
    }

    pub fn rule_stroke(&self) -> Stroke {
        Stroke {
            width: self.spacing.rule_width,
            color: self.colors.rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RenderConfig::from_json(
            r##"{"pageSize":"Letter","fonts":{"body":11},"colors":{"partBand":"#003366"}}"##,
        )
        .unwrap();
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.fonts.body, 11.0);
        assert_eq!(config.fonts.table, FontSizes::default().table);
        assert_eq!(config.colors.part_band, Color::rgb(0x00, 0x33, 0x66));
        assert_eq!(config.table.deployment_min_rows, 7);
    }

    #[test]
    fn validate_rejects_margins_wider_than_page() {
        let mut config = RenderConfig {
            page_size: PageSize::Custom {
                width: 100.0,
                height: 100.0,
            },
            ..Default::default()
        };
        config.margins = Margins::all(60.0);
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));

        config.margins = Margins::all(10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_font() {
        let mut config = RenderConfig::default();
        config.fonts.body = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_numbered_ratios_not_summing_to_one() {
        let config =
            RenderConfig::from_json(r#"{"table":{"numberedRatios":[0.2,0.2,0.2]}}"#).unwrap();
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));

        let config =
            RenderConfig::from_json(r#"{"table":{"numberedRatios":[-0.1,0.6,0.5]}}"#).unwrap();
        assert!(config.validate().is_err());

        let config =
            RenderConfig::from_json(r#"{"table":{"numberedRatios":[0.1,0.4,0.5]}}"#).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_label_ratios_outside_unit_interval() {
        for json in [
            r#"{"table":{"labelRatio":1.4}}"#,
            r#"{"table":{"labelRatio":1.0}}"#,
            r#"{"table":{"labelRatio":0.0}}"#,
            r#"{"table":{"subLabelRatio":1.2}}"#,
        ] {
            let config = RenderConfig::from_json(json).unwrap();
            assert!(
                matches!(config.validate(), Err(LayoutError::InvalidConfig(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_banner_that_fills_the_page() {
        let mut config = RenderConfig::default();
        config.fonts.banner_title_first_page = 600.0;
        assert!(matches!(config.validate(), Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn footer_template_substitution() {
        let footer = FooterConfig::default();
        assert_eq!(footer.render(2, 9), "Page 2 of 9");
    }

    #[test]
    fn first_page_banner_is_larger() {
        let config = RenderConfig::default();
        assert!(
            config.banner_title_style(true).font_size > config.banner_title_style(false).font_size
        );
    }
}
