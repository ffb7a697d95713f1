use super::columns::ColumnLayout;
use crate::LayoutError;
use crate::controller::PageController;
use crate::format::format_key_label;
use crate::painting::borders::{VerticalAlign, cell_text, fill, hline, vline};
use issp_idf::{CellAlign, HeaderGroup, TableColumn};
use issp_render_core::{TextAlign, TextStyle};
use issp_types::Rect;

/// A table header that can be drawn again, unchanged, after a page break.
pub trait TableHeader {
    fn height(&self, pc: &PageController<'_>) -> f32;

    /// Draws the header at the cursor without moving it.
    fn draw(&self, pc: &mut PageController<'_>, height: f32) -> Result<(), LayoutError>;
}

pub fn header_label(column: &TableColumn) -> String {
    column
        .label
        .clone()
        .unwrap_or_else(|| format_key_label(&column.key))
}

pub(crate) fn aligned(style: &TextStyle, align: CellAlign) -> TextStyle {
    match align {
        CellAlign::Left => style.clone(),
        CellAlign::Center => style.clone().aligned(TextAlign::Center),
    }
}

fn group_of(groups: &[HeaderGroup], column: usize) -> Option<usize> {
    groups.iter().position(|g| g.contains(column))
}

/// Header rows, one or two. Columns outside every group span both rows.
pub(crate) struct HeaderGeometry<'h> {
    pub layout: &'h ColumnLayout,
    pub groups: &'h [HeaderGroup],
    pub labels: &'h [String],
}

impl HeaderGeometry<'_> {
    fn text_height(&self, pc: &PageController<'_>, text: &str, width: f32, style: &TextStyle) -> f32 {
        let padding = pc.config().table.cell_padding;
        pc.measure_text_height(text, (width - 2.0 * padding).max(1.0), style) + 2.0 * padding
    }

    /// Heights of the group row and the column row. The group row is zero
    /// for a single-row header.
    pub fn row_heights(&self, pc: &PageController<'_>, style: &TextStyle) -> (f32, f32) {
        let min = pc.config().table.min_row_height;
        if self.groups.is_empty() {
            let h = self
                .labels
                .iter()
                .enumerate()
                .map(|(i, label)| self.text_height(pc, label, self.layout.widths[i], style))
                .fold(min, f32::max);
            return (0.0, h);
        }

        let top = self
            .groups
            .iter()
            .map(|g| self.text_height(pc, &g.label, self.layout.span_width(g.first_column, g.span), style))
            .fold(min, f32::max);
        let mut bottom = min;
        let mut spanning = 0.0_f32;
        for (i, label) in self.labels.iter().enumerate() {
            let h = self.text_height(pc, label, self.layout.widths[i], style);
            if group_of(self.groups, i).is_some() {
                bottom = bottom.max(h);
            } else {
                spanning = spanning.max(h);
            }
        }
        (top, bottom.max(spanning - top))
    }

    /// Background and rules. Interior column rules inside a group stop at
    /// the group row; the rule under the group row spans only the group.
    pub fn draw_frame(&self, pc: &mut PageController<'_>, y: f32, top: f32, height: f32) -> Result<(), LayoutError> {
        let top = top.min(height);
        let config = pc.config();
        let stroke = config.border_stroke();
        let left = self.layout.left;
        let right = self.layout.right();
        fill(
            pc,
            Rect::new(left, y, right - left, height),
            config.colors.header_background,
        )?;
        hline(pc, left, right, y, &stroke)?;
        hline(pc, left, right, y + height, &stroke)?;

        for (i, &x) in self.layout.edges.iter().enumerate() {
            let inside_group = i > 0
                && i < self.layout.len()
                && group_of(self.groups, i - 1).is_some()
                && group_of(self.groups, i - 1) == group_of(self.groups, i);
            let from = if inside_group { y + top } else { y };
            vline(pc, x, from, y + height, &stroke)?;
        }
        for group in self.groups {
            let x1 = self.layout.x(group.first_column);
            let x2 = x1 + self.layout.span_width(group.first_column, group.span);
            hline(pc, x1, x2, y + top, &stroke)?;
        }
        Ok(())
    }

    pub fn draw_labels(
        &self,
        pc: &mut PageController<'_>,
        y: f32,
        top: f32,
        height: f32,
        style: &TextStyle,
        aligns: &[CellAlign],
        valign: VerticalAlign,
    ) -> Result<(), LayoutError> {
        let top = top.min(height);
        let padding = pc.config().table.cell_padding;
        let centered = style.clone().aligned(TextAlign::Center);
        for group in self.groups {
            let cell = Rect::new(
                self.layout.x(group.first_column),
                y,
                self.layout.span_width(group.first_column, group.span),
                top,
            );
            cell_text(pc, &group.label, cell, padding, &centered, valign)?;
        }
        for (i, label) in self.labels.iter().enumerate() {
            let x = self.layout.x(i);
            let w = self.layout.widths[i];
            let cell = if group_of(self.groups, i).is_some() {
                Rect::new(x, y + top, w, height - top)
            } else {
                Rect::new(x, y, w, height)
            };
            let align = aligns.get(i).copied().unwrap_or_default();
            cell_text(pc, label, cell, padding, &aligned(style, align), valign)?;
        }
        Ok(())
    }
}

/// The plain grid header: labels top-aligned on a tinted background, with
/// an optional row of merged group cells above.
#[derive(Debug, Clone)]
pub struct GridHeader {
    labels: Vec<String>,
    aligns: Vec<CellAlign>,
    layout: ColumnLayout,
    groups: Vec<HeaderGroup>,
}

impl GridHeader {
    pub fn new(columns: &[TableColumn], layout: ColumnLayout) -> Self {
        Self {
            labels: columns.iter().map(header_label).collect(),
            aligns: columns.iter().map(|c| c.align).collect(),
            layout,
            groups: Vec::new(),
        }
    }

    pub fn with_groups(mut self, groups: Vec<HeaderGroup>) -> Self {
        debug_assert!(
            groups
                .iter()
                .all(|g| g.span > 0 && g.first_column + g.span <= self.layout.len()),
            "header group spans past the last column"
        );
        debug_assert!(
            (0..self.layout.len()).all(|c| groups.iter().filter(|g| g.contains(c)).count() <= 1),
            "header groups overlap"
        );
        self.groups = groups;
        self
    }

    fn geometry(&self) -> HeaderGeometry<'_> {
        HeaderGeometry {
            layout: &self.layout,
            groups: &self.groups,
            labels: &self.labels,
        }
    }
}

impl TableHeader for GridHeader {
    fn height(&self, pc: &PageController<'_>) -> f32 {
        let (top, bottom) = self.geometry().row_heights(pc, &pc.config().table_header_style());
        top + bottom
    }

    fn draw(&self, pc: &mut PageController<'_>, height: f32) -> Result<(), LayoutError> {
        let style = pc.config().table_header_style();
        let geometry = self.geometry();
        let (top, _) = geometry.row_heights(pc, &style);
        let y = pc.cursor().y;
        geometry.draw_frame(pc, y, top, height)?;
        geometry.draw_labels(pc, y, top, height, &style, &self.aligns, VerticalAlign::Top)
    }
}
