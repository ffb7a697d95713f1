use crate::format::is_blank;
use issp_idf::Row;

/// A row is empty when every cell is missing or blank.
pub fn is_row_empty(row: &Row) -> bool {
    row.cells.values().all(is_blank)
}

/// Drops rows with no visible content, keeping the order of the rest.
pub fn sanitize_rows(rows: &[Row]) -> Vec<&Row> {
    rows.iter().filter(|row| !is_row_empty(row)).collect()
}
