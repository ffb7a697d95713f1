//! Grid table renderer: the column/row primitive every table recipe is
//! built on.

mod columns;
mod grid;
mod header;
mod sanitize;

pub use columns::{ColumnLayout, resolve_column_widths};
pub use grid::{GridOptions, GridRow, GridTable, TableOutcome, render_table};
pub use header::{GridHeader, TableHeader, header_label};
pub(crate) use header::HeaderGeometry;
pub use sanitize::{is_row_empty, sanitize_rows};
