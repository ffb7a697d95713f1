use crate::LayoutError;
use crate::controller::PageController;
use crate::table::{GridOptions, GridTable, TableOutcome, sanitize_rows};
use issp_idf::{DeploymentTable, Row};
use log::debug;

/// Deployment table: merged group header over the per-year columns, rows
/// padded with blanks up to the minimum count, and every row sized to its
/// tallest wrapped cell with the configured floor.
pub fn render_deployment(
    pc: &mut PageController<'_>,
    deployment: &DeploymentTable,
) -> Result<TableOutcome, LayoutError> {
    let config = pc.config();
    let table = &deployment.table;
    let min_rows = deployment.min_rows.unwrap_or(config.table.deployment_min_rows);

    let filler = Row::empty();
    let mut rows = sanitize_rows(&table.rows);
    let real = rows.len();
    while rows.len() < min_rows {
        rows.push(&filler);
    }
    debug!("Deployment table: {} rows padded to {}", real, rows.len());

    let options = GridOptions {
        row_height: None,
        min_row_height: Some(config.table.deployment_min_row_height),
        ..Default::default()
    };
    let grid = GridTable::new(pc, &table.columns, options).with_header_groups(table.header_groups.clone());
    grid.render(pc, &rows)
}
