use crate::LayoutError;
use crate::controller::PageController;
use crate::painting::borders::VerticalAlign;
use crate::table::{
    ColumnLayout, GridOptions, GridTable, HeaderGeometry, TableHeader, TableOutcome, header_label,
    sanitize_rows,
};
use issp_idf::{CellAlign, HeaderGroup, InvestmentTable};

/// Two header rows: year groups on top, each split into its sub-columns
/// below. Leading columns span both rows. Every label is centred
/// vertically in its cell.
#[derive(Debug, Clone)]
pub struct NestedYearHeader {
    labels: Vec<String>,
    aligns: Vec<CellAlign>,
    layout: ColumnLayout,
    groups: Vec<HeaderGroup>,
}

impl NestedYearHeader {
    pub fn new(table: &InvestmentTable, layout: ColumnLayout) -> Self {
        let columns = table.flat_columns();
        let mut first = table.columns.len();
        let groups = table
            .groups
            .iter()
            .map(|group| {
                let header = HeaderGroup::new(group.label.clone(), first, group.columns.len());
                first += group.columns.len();
                header
            })
            .filter(|group| group.span > 0)
            .collect();
        Self {
            labels: columns.iter().map(header_label).collect(),
            aligns: columns.iter().map(|_| CellAlign::Center).collect(),
            layout,
            groups,
        }
    }

    fn geometry(&self) -> HeaderGeometry<'_> {
        HeaderGeometry {
            layout: &self.layout,
            groups: &self.groups,
            labels: &self.labels,
        }
    }
}

impl TableHeader for NestedYearHeader {
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
        geometry.draw_labels(pc, y, top, height, &style, &self.aligns, VerticalAlign::Middle)
    }
}

/// Investment summary: leading columns, then physical-target and cost
/// sub-columns under each year.
pub fn render_investment(
    pc: &mut PageController<'_>,
    table: &InvestmentTable,
) -> Result<TableOutcome, LayoutError> {
    let columns = table.flat_columns();
    let rows = sanitize_rows(&table.rows);
    let grid = GridTable::new(pc, &columns, GridOptions::default());
    let header = NestedYearHeader::new(table, grid.layout().clone());
    let grid = grid.with_header(Box::new(header));
    grid.render(pc, &rows)
}
