use crate::LayoutError;
use crate::controller::PageController;
use crate::format::format_value;
use crate::table::{GridOptions, GridRow, GridTable, TableOutcome};
use issp_idf::{NumberedItem, NumberedTable, TableColumn};
use issp_render_core::{TextAlign, TextFrame, TextStyle};

/// One numbered row: ordinal, label over an optional secondary line, value
/// over an optional value label.
struct NumberedRow<'a> {
    ordinal: String,
    item: &'a NumberedItem,
}

impl NumberedRow<'_> {
    /// Text runs stacked in each column, top to bottom.
    fn stacks(&self, pc: &PageController<'_>) -> [Vec<(String, TextStyle)>; 3] {
        let config = pc.config();
        let body = config.table_style();
        let secondary = config.small_style();
        let mut item = vec![(self.item.label.clone(), body.clone().bold())];
        if let Some(text) = self.item.secondary.as_deref().filter(|s| !s.trim().is_empty()) {
            item.push((text.to_string(), secondary.clone()));
        }
        let mut value = vec![(format_value(&self.item.value), body.clone())];
        if let Some(text) = self.item.value_label.as_deref().filter(|s| !s.trim().is_empty()) {
            value.push((text.to_string(), secondary));
        }
        [
            vec![(self.ordinal.clone(), body.aligned(TextAlign::Center))],
            item,
            value,
        ]
    }
}

impl GridRow for NumberedRow<'_> {
    fn measure(&self, pc: &PageController<'_>, grid: &GridTable<'_>) -> f32 {
        let padding = grid.padding();
        self.stacks(pc)
            .iter()
            .enumerate()
            .map(|(i, runs)| {
                let width = (grid.layout().widths[i] - 2.0 * padding).max(1.0);
                runs.iter()
                    .map(|(text, style)| pc.measure_text_height(text, width, style))
                    .sum::<f32>()
            })
            .fold(0.0, f32::max)
            + 2.0 * padding
    }

    fn draw_cells(
        &self,
        pc: &mut PageController<'_>,
        grid: &GridTable<'_>,
        y: f32,
        height: f32,
    ) -> Result<(), LayoutError> {
        let padding = grid.padding();
        let layout = grid.layout();
        let bottom = y + height - padding;
        for (i, runs) in self.stacks(pc).iter().enumerate() {
            let x = layout.x(i) + padding;
            let width = (layout.widths[i] - 2.0 * padding).max(1.0);
            let mut run_y = y + padding;
            for (text, style) in runs {
                let space = bottom - run_y;
                if space < pc.line_height(style) - 0.01 {
                    break;
                }
                let run_height = pc.measure_text_height(text, width, style).min(space);
                pc.draw_text(text, TextFrame::new(x, run_y, width).clipped(space), style)?;
                run_y += run_height;
            }
        }
        Ok(())
    }
}

/// Three columns: ordinal, label with an optional secondary line stacked
/// under it, and value with an optional label stacked under it.
pub fn render_numbered(
    pc: &mut PageController<'_>,
    table: &NumberedTable,
) -> Result<TableOutcome, LayoutError> {
    let ratios = pc.config().table.numbered_ratios;
    let [h0, h1, h2] = table
        .headers
        .clone()
        .unwrap_or_else(|| ["#".to_string(), "Item".to_string(), "Details".to_string()]);
    let columns = vec![
        TableColumn::new("number", h0, ratios[0]).centered(),
        TableColumn::new("item", h1, ratios[1]),
        TableColumn::new("value", h2, ratios[2]),
    ];
    let options = GridOptions {
        show_header: table.headers.is_some(),
        ..Default::default()
    };
    let grid = GridTable::new(pc, &columns, options);
    let rows: Vec<NumberedRow<'_>> = table
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| NumberedRow {
            ordinal: format!("{}.", i + 1),
            item,
        })
        .collect();
    grid.render(pc, &rows)
}
