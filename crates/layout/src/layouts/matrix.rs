use crate::LayoutError;
use crate::controller::PageController;
use crate::format::format_cell;
use crate::table::{GridOptions, GridTable, TableOutcome, sanitize_rows};
use issp_idf::{MatrixCell, MatrixTable, Record, Row, Value};
use std::collections::HashMap;

/// Folds the flat entry list into grid rows. Each `Keys` cell joins the
/// non-blank values of its keys with a blank line between them.
pub fn matrix_rows(matrix: &MatrixTable) -> Vec<Row> {
    let values: HashMap<&str, String> = matrix
        .entries
        .iter()
        .map(|entry| (entry.key.as_str(), format_cell(&entry.value)))
        .collect();

    matrix
        .rows
        .iter()
        .map(|row| {
            debug_assert!(
                row.cells.len() <= matrix.columns.len(),
                "matrix row has more cells than columns"
            );
            let cells: Record = matrix
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(column, cell)| {
                    let text = match cell {
                        MatrixCell::Literal(text) => text.clone(),
                        MatrixCell::Keys(keys) => keys
                            .iter()
                            .filter_map(|key| values.get(key.as_str()))
                            .filter(|value| !value.is_empty())
                            .cloned()
                            .collect::<Vec<_>>()
                            .join("\n\n"),
                    };
                    (column.key.clone(), Value::String(text))
                })
                .collect();
            Row::new(cells)
        })
        .collect()
}

pub fn render_matrix(
    pc: &mut PageController<'_>,
    matrix: &MatrixTable,
) -> Result<TableOutcome, LayoutError> {
    let rows = matrix_rows(matrix);
    let rows = sanitize_rows(&rows);
    let grid = GridTable::new(pc, &matrix.columns, GridOptions::default());
    grid.render(pc, &rows)
}
