use super::columns::ColumnLayout;
use super::header::{GridHeader, TableHeader, aligned};
use super::sanitize::sanitize_rows;
use crate::LayoutError;
use crate::controller::PageController;
use crate::format::format_cell_opt;
use crate::painting::borders::{VerticalAlign, cell_text, column_rules, hline};
use crate::text::notice;
use issp_idf::{HeaderGroup, Row, Table, TableColumn};
use issp_render_core::TextStyle;
use issp_types::Rect;
use log::{debug, trace, warn};

#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Fixed height for every row without its own override. `None` sizes
    /// rows from their content.
    pub row_height: Option<f32>,
    /// Floor for content-sized rows. `None` uses the configured minimum.
    pub min_row_height: Option<f32>,
    pub show_header: bool,
    /// Space after the table. `None` uses the configured table gap.
    pub gap_after: Option<f32>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: None,
            min_row_height: None,
            show_header: true,
            gap_after: None,
        }
    }
}

/// What a single table render did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOutcome {
    pub rows_drawn: usize,
    /// Times the header was drawn, the first included.
    pub header_draws: usize,
    /// Pages the table touched.
    pub pages: usize,
}

impl TableOutcome {
    pub fn header_replays(&self) -> usize {
        self.header_draws.saturating_sub(1)
    }
}

/// Content of one grid row. The grid owns row height, borders and
/// pagination; a row only measures and fills its cells.
pub trait GridRow {
    fn fixed_height(&self) -> Option<f32> {
        None
    }

    /// Height of the tallest cell including padding, measured without drawing.
    fn measure(&self, pc: &PageController<'_>, grid: &GridTable<'_>) -> f32;

    fn draw_cells(
        &self,
        pc: &mut PageController<'_>,
        grid: &GridTable<'_>,
        y: f32,
        height: f32,
    ) -> Result<(), LayoutError>;
}

impl<T: GridRow + ?Sized> GridRow for &T {
    fn fixed_height(&self) -> Option<f32> {
        (**self).fixed_height()
    }

    fn measure(&self, pc: &PageController<'_>, grid: &GridTable<'_>) -> f32 {
        (**self).measure(pc, grid)
    }

    fn draw_cells(
        &self,
        pc: &mut PageController<'_>,
        grid: &GridTable<'_>,
        y: f32,
        height: f32,
    ) -> Result<(), LayoutError> {
        (**self).draw_cells(pc, grid, y, height)
    }
}

impl GridRow for Row {
    fn fixed_height(&self) -> Option<f32> {
        self.height
    }

    fn measure(&self, pc: &PageController<'_>, grid: &GridTable<'_>) -> f32 {
        let padding = grid.padding();
        let tallest = grid
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let text = format_cell_opt(self.get(&column.key));
                if text.is_empty() {
                    return 0.0;
                }
                let width = (grid.layout().widths[i] - 2.0 * padding).max(1.0);
                pc.measure_text_height(&text, width, grid.cell_style())
            })
            .fold(0.0, f32::max);
        tallest + 2.0 * padding
    }

    fn draw_cells(
        &self,
        pc: &mut PageController<'_>,
        grid: &GridTable<'_>,
        y: f32,
        height: f32,
    ) -> Result<(), LayoutError> {
        let layout = grid.layout();
        for (i, column) in grid.columns().iter().enumerate() {
            let text = format_cell_opt(self.get(&column.key));
            let cell = Rect::new(layout.x(i), y, layout.widths[i], height);
            let style = aligned(grid.cell_style(), column.align);
            cell_text(pc, &text, cell, grid.padding(), &style, VerticalAlign::Top)?;
        }
        Ok(())
    }
}

/// A bordered table whose header is drawn by a separate step so it can be
/// replayed verbatim after every page break.
pub struct GridTable<'t> {
    columns: &'t [TableColumn],
    layout: ColumnLayout,
    header: Option<Box<dyn TableHeader + 't>>,
    cell_style: TextStyle,
    padding: f32,
    row_height: Option<f32>,
    min_row_height: f32,
    gap_after: f32,
}

impl<'t> GridTable<'t> {
    pub fn new(pc: &PageController<'_>, columns: &'t [TableColumn], options: GridOptions) -> Self {
        let config = pc.config();
        let cursor = pc.cursor();
        let ratios: Vec<f32> = columns.iter().map(|c| c.width_ratio).collect();
        let layout = ColumnLayout::new(cursor.left, cursor.content_width, &ratios);
        let header: Option<Box<dyn TableHeader + 't>> = if options.show_header {
            Some(Box::new(GridHeader::new(columns, layout.clone())))
        } else {
            None
        };
        Self {
            columns,
            layout,
            header,
            cell_style: config.table_style(),
            padding: config.table.cell_padding,
            row_height: options.row_height,
            min_row_height: options.min_row_height.unwrap_or(config.table.min_row_height),
            gap_after: options.gap_after.unwrap_or(config.spacing.table_gap),
        }
    }

    /// Adds a row of merged group cells above the column labels.
    pub fn with_header_groups(mut self, groups: Vec<HeaderGroup>) -> Self {
        if self.header.is_some() && !groups.is_empty() {
            let header = GridHeader::new(self.columns, self.layout.clone()).with_groups(groups);
            self.header = Some(Box::new(header));
        }
        self
    }

    /// Replaces the plain header with a custom one.
    pub fn with_header(mut self, header: Box<dyn TableHeader + 't>) -> Self {
        self.header = Some(header);
        self
    }

    pub fn columns(&self) -> &[TableColumn] {
        self.columns
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn cell_style(&self) -> &TextStyle {
        &self.cell_style
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn header_height(&self, pc: &PageController<'_>) -> f32 {
        self.header.as_ref().map(|h| h.height(pc)).unwrap_or(0.0)
    }

    /// Draws the header at the cursor and moves below it.
    pub fn draw_table_header(&self, pc: &mut PageController<'_>, height: f32) -> Result<(), LayoutError> {
        if let Some(header) = &self.header {
            header.draw(pc, height)?;
            pc.advance(height);
        }
        Ok(())
    }

    /// Row override, then the fixed table height, then measured content
    /// with the minimum as a floor. Never more than `max_height`.
    pub fn row_height<R: GridRow>(&self, pc: &PageController<'_>, row: &R, max_height: f32) -> f32 {
        let height = row
            .fixed_height()
            .or(self.row_height)
            .unwrap_or_else(|| row.measure(pc, self).max(self.min_row_height));
        if height > max_height {
            warn!(
                "Table row of height {:.2} exceeds the page; clamping to {:.2}",
                height, max_height
            );
            return max_height;
        }
        height
    }

    /// Draws one row at the cursor: cells, the bottom rule and every column
    /// rule. The top edge belongs to the header or the previous row.
    pub fn draw_row<R: GridRow>(&self, pc: &mut PageController<'_>, row: &R, height: f32) -> Result<(), LayoutError> {
        let stroke = pc.config().border_stroke();
        let y = pc.cursor().y;
        trace!("Row at y={:.2} height={:.2} on page {}", y, height, pc.cursor().page_index + 1);
        row.draw_cells(pc, self, y, height)?;
        hline(pc, self.layout.left, self.layout.right(), y + height, &stroke)?;
        column_rules(pc, self.layout.edges.iter().copied(), y, y + height, &stroke)?;
        pc.advance(height);
        Ok(())
    }

    pub fn render<R: GridRow>(&self, pc: &mut PageController<'_>, rows: &[R]) -> Result<TableOutcome, LayoutError> {
        let mut outcome = TableOutcome::default();
        if rows.is_empty() {
            notice(pc, 0.0)?;
            return Ok(outcome);
        }

        let full = pc.full_page_height();
        let mut header_height = self.header_height(pc);
        let header_limit = (full - self.min_row_height).max(full / 2.0);
        if header_height > header_limit {
            warn!(
                "Table header of {:.1}pt does not leave room for a row; clamping to {:.1}pt",
                header_height, header_limit
            );
            header_height = header_limit;
        }
        let max_row = (full - header_height).max(1.0);
        let heights: Vec<f32> = rows.iter().map(|row| self.row_height(pc, row, max_row)).collect();

        let first_page = pc.cursor().page_index;
        pc.ensure_space(header_height + heights[0])?;
        let start_page = pc.cursor().page_index;
        let mut needs_top_rule = self.header.is_none();
        if self.header.is_some() {
            self.draw_table_header(pc, header_height)?;
            outcome.header_draws += 1;
        }

        let stroke = pc.config().border_stroke();
        for (row, &height) in rows.iter().zip(&heights) {
            if pc.ensure_space(height)? {
                if self.header.is_some() {
                    debug!("Replaying table header on page {}", pc.cursor().page_index + 1);
                    self.draw_table_header(pc, header_height)?;
                    outcome.header_draws += 1;
                } else {
                    needs_top_rule = true;
                }
            }
            if needs_top_rule {
                let y = pc.cursor().y;
                hline(pc, self.layout.left, self.layout.right(), y, &stroke)?;
                needs_top_rule = false;
            }
            self.draw_row(pc, row, height)?;
            outcome.rows_drawn += 1;
        }

        outcome.pages = pc.cursor().page_index - start_page + 1;
        pc.advance(self.gap_after);
        debug!(
            "Table drew {} rows over {} pages ({} header replays, started on page {})",
            outcome.rows_drawn,
            outcome.pages,
            outcome.header_replays(),
            first_page + 1
        );
        Ok(outcome)
    }
}

/// Renders a plain table: blank rows are dropped and zero remaining rows
/// draw the "No data provided." line instead of an empty frame.
pub fn render_table(
    pc: &mut PageController<'_>,
    table: &Table,
    options: GridOptions,
) -> Result<TableOutcome, LayoutError> {
    let rows = sanitize_rows(&table.rows);
    let options = GridOptions {
        row_height: options.row_height.or(pc.config().table.row_height),
        ..options
    };
    let grid = GridTable::new(pc, &table.columns, options).with_header_groups(table.header_groups.clone());
    grid.render(pc, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NO_DATA;
    use crate::test_utils::{body_texts, default_config, render_with, short_page_config};
    use issp_render_core::DrawOp;
    use serde_json::json;

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("system", "System", 0.5),
            TableColumn::new("status", "Status", 0.25).centered(),
            TableColumn::new("owner", "Owner", 0.25),
        ]
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row::from_pairs([("system", json!(format!("System {i}"))), ("status", json!("Live")), ("owner", json!(null))]))
            .collect()
    }

    #[test]
    fn zero_rows_draw_notice_without_header() {
        let config = default_config();
        let table = Table::new(columns(), vec![Row::empty(), Row::from_pairs([("system", json!(" "))])]);
        let (surface, outcome) = render_with(&config, |pc| render_table(pc, &table, GridOptions::default()));
        assert_eq!(outcome, TableOutcome::default());
        let texts = body_texts(&surface);
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].1, NO_DATA);
        for label in ["System", "Status", "Owner"] {
            assert!(texts.iter().all(|(_, t, _)| t != label), "header label {label} drawn");
        }
        assert!(!surface.ops().iter().any(|op| matches!(op, DrawOp::Rect { .. })));
    }

    #[test]
    fn header_taller_than_page_is_clamped_inside_margins() {
        let config = short_page_config();
        let long_label = (0..40).map(|i| format!("Word{i}")).collect::<Vec<_>>().join(" ");
        let table = Table::new(
            vec![
                TableColumn::new("system", long_label, 0.1),
                TableColumn::new("status", "Status", 0.9),
            ],
            rows(2),
        );
        let (surface, outcome) = render_with(&config, |pc| render_table(pc, &table, GridOptions::default()));

        assert_eq!(outcome.rows_drawn, 2);
        let bottom = config.page_dimensions().height - config.margins.bottom;
        for op in surface.ops() {
            match op {
                DrawOp::Line { from, to, .. } => {
                    assert!(from.y.max(to.y) <= bottom + 0.01, "{op:?} crosses the bottom margin")
                }
                DrawOp::Rect { rect, .. } => {
                    assert!(rect.y + rect.height <= bottom + 0.01, "{op:?} crosses the bottom margin")
                }
                _ => {}
            }
        }
    }

    #[test]
    fn header_is_replayed_identically_after_break() {
        let config = short_page_config();
        let table = Table::new(columns(), rows(30));
        let (surface, outcome) = render_with(&config, |pc| render_table(pc, &table, GridOptions::default()));

        assert_eq!(outcome.rows_drawn, 30);
        assert!(outcome.pages > 1);
        assert_eq!(outcome.header_draws, outcome.pages);

        let headers: Vec<(usize, f32, f32, TextStyleKey)> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { page, text, frame, style, .. } if text == "Status" => {
                    Some((*page, frame.x, frame.width, TextStyleKey::from(style)))
                }
                _ => None,
            })
            .collect();
        assert_eq!(headers.len(), outcome.pages);
        for (i, header) in headers.iter().enumerate() {
            assert_eq!(header.0, i);
            assert_eq!((header.1, header.2, &header.3), (headers[0].1, headers[0].2, &headers[0].3));
        }
    }

    #[test]
    fn rows_are_not_split_and_stay_in_order() {
        let config = short_page_config();
        let table = Table::new(columns(), rows(30));
        let (surface, _) = render_with(&config, |pc| render_table(pc, &table, GridOptions::default()));
        let bottom = config.page_dimensions().height - config.margins.bottom;
        let systems: Vec<String> = body_texts(&surface)
            .into_iter()
            .filter(|(_, t, _)| t.starts_with("System "))
            .map(|(_, t, _)| t)
            .collect();
        assert_eq!(systems.len(), 30);
        assert_eq!(systems[29], "System 29");
        for (_, from, to) in surface.lines() {
            assert!(from.y <= bottom + 0.01 && to.y <= bottom + 0.01);
        }
    }

    #[test]
    fn fixed_row_height_and_override() {
        let config = default_config();
        let mut table = Table::new(columns(), rows(2));
        table.rows[1] = table.rows[1].clone().with_height(40.0);
        let (_, heights) = render_with(&config, |pc| {
            let grid = GridTable::new(pc, &table.columns, GridOptions { row_height: Some(25.0), ..Default::default() });
            Ok(table.rows.iter().map(|r| grid.row_height(pc, r, 1000.0)).collect::<Vec<_>>())
        });
        assert_eq!(heights, [25.0, 40.0]);
    }

    #[test]
    fn content_sized_rows_use_tallest_cell() {
        let config = default_config();
        let long = "word ".repeat(80);
        let row = Row::from_pairs([("system", json!(long)), ("status", json!("Live"))]);
        let columns = columns();
        let (_, (height, lines)) = render_with(&config, |pc| {
            let grid = GridTable::new(pc, &columns, GridOptions::default());
            let width = grid.layout().widths[0] - 2.0 * grid.padding();
            let lines = pc.wrap_text(long.trim(), width, grid.cell_style()).len();
            Ok((grid.row_height(pc, &row, 1000.0), lines))
        });
        let expected = lines as f32 * config.table_style().line_height() + 2.0 * config.table.cell_padding;
        assert!(lines > 1);
        assert!((height - expected).abs() < 1e-3);
    }

    #[test]
    fn oversized_row_is_clamped_to_page() {
        let config = short_page_config();
        let long = "lorem ipsum ".repeat(400);
        let table = Table::new(columns(), vec![Row::from_pairs([("system", json!(long))])]);
        let (surface, outcome) = render_with(&config, |pc| render_table(pc, &table, GridOptions::default()));
        assert_eq!(outcome.rows_drawn, 1);
        let bottom = config.page_dimensions().height - config.margins.bottom;
        for (_, from, to) in surface.lines() {
            assert!(from.y <= bottom + 0.01 && to.y <= bottom + 0.01);
        }
        let clipped = surface.ops().iter().any(|op| match op {
            DrawOp::Text { lines, .. } => lines.last().is_some_and(|l| l.text.ends_with('…')),
            _ => false,
        });
        assert!(clipped);
    }

    #[test]
    fn shared_edges_are_stroked_once() {
        let config = default_config();
        let table = Table::new(columns(), rows(3));
        let (surface, top) = render_with(&config, |pc| {
            let top = pc.cursor().y;
            render_table(pc, &table, GridOptions::default())?;
            Ok(top)
        });
        let mut horizontals: Vec<(i64, i64, i64)> = surface
            .lines()
            .into_iter()
            .filter(|(_, from, to)| from.y == to.y && from.x != to.x)
            .filter(|(_, from, _)| from.y >= top - 0.01)
            .map(|(_, from, to)| ((from.y * 100.0) as i64, (from.x * 100.0) as i64, (to.x * 100.0) as i64))
            .collect();
        let count = horizontals.len();
        horizontals.sort();
        horizontals.dedup();
        assert_eq!(count, horizontals.len());
        // Header top, header bottom and one rule under each row.
        assert_eq!(count, 2 + 3);
    }

    #[derive(Debug, PartialEq)]
    struct TextStyleKey(u32, bool, bool);

    impl From<&TextStyle> for TextStyleKey {
        fn from(style: &TextStyle) -> Self {
            Self(
                style.font_size.to_bits(),
                style.weight == issp_render_core::FontWeight::Bold,
                style.italic,
            )
        }
    }
}
