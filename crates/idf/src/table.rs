use crate::{Record, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub key: String,
    /// Header text. `None` derives a title from `key`.
    pub label: Option<String>,
    /// Fraction of the content width. Ratios of a table sum to 1.0.
    pub width_ratio: f32,
    pub align: CellAlign,
}

impl TableColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>, width_ratio: f32) -> Self {
        Self {
            key: key.into(),
            label: Some(label.into()),
            width_ratio,
            align: CellAlign::Left,
        }
    }

    /// A column whose header is derived from its key.
    pub fn keyed(key: impl Into<String>, width_ratio: f32) -> Self {
        Self {
            key: key.into(),
            label: None,
            width_ratio,
            align: CellAlign::Left,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = CellAlign::Center;
        self
    }
}

/// A merged header cell spanning `span` adjacent columns starting at
/// `first_column`. Columns not covered by any group get a header cell that
/// spans both header rows.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderGroup {
    pub label: String,
    pub first_column: usize,
    pub span: usize,
}

impl HeaderGroup {
    pub fn new(label: impl Into<String>, first_column: usize, span: usize) -> Self {
        Self {
            label: label.into(),
            first_column,
            span,
        }
    }

    pub fn contains(&self, column: usize) -> bool {
        column >= self.first_column && column < self.first_column + self.span
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: Record,
    /// Fixed height for this row. Overrides both the table default and the
    /// content-derived height.
    pub height: Option<f32>,
}

impl Row {
    pub fn new(cells: Record) -> Self {
        Self {
            cells,
            height: None,
        }
    }

    /// A row with no cells, used to pad tables to a minimum size.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.cells.get(key)
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Record> for Row {
    fn from(cells: Record) -> Self {
        Self::new(cells)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Row>,
    pub header_groups: Vec<HeaderGroup>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            header_groups: Vec::new(),
        }
    }

    pub fn with_header_group(mut self, group: HeaderGroup) -> Self {
        self.header_groups.push(group);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    /// Display label. `None` derives one from `key`.
    pub label: Option<String>,
    pub value: Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            label: None,
            value: value.into(),
        }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubRow {
    pub label: String,
    pub value: Value,
    pub height: Option<f32>,
}

impl SubRow {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            height: None,
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

/// A row of the label-value layout. When `sub_rows` is non-empty the value
/// column is split into sub-label / sub-value pairs and `value` is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelValueRow {
    pub label: String,
    pub value: Value,
    pub sub_rows: Vec<SubRow>,
    pub height: Option<f32>,
}

impl LabelValueRow {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            sub_rows: Vec::new(),
            height: None,
        }
    }

    pub fn nested(label: impl Into<String>, sub_rows: Vec<SubRow>) -> Self {
        Self {
            label: label.into(),
            value: Value::Null,
            sub_rows,
            height: None,
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberedItem {
    pub label: String,
    /// Stacked under the label in the second column.
    pub secondary: Option<String>,
    pub value: Value,
    /// Stacked under the value in the third column.
    pub value_label: Option<String>,
}

impl NumberedItem {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            secondary: None,
            value: value.into(),
            value_label: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberedTable {
    /// Optional header labels for the number, item and value columns.
    pub headers: Option<[String; 3]>,
    pub items: Vec<NumberedItem>,
}

/// Where a performance-matrix cell takes its text from.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixCell {
    Literal(String),
    /// Values of these entry keys, joined with blank lines.
    Keys(Vec<String>),
}

impl MatrixCell {
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MatrixCell::Keys(keys.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRow {
    /// One entry per output column.
    pub cells: Vec<MatrixCell>,
}

/// A flat list of key/value entries re-aggregated into a small grid through a
/// caller-supplied static grouping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixTable {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<MatrixRow>,
    pub entries: Vec<KeyValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentTable {
    /// Columns, rows and the group spanning the per-year columns.
    pub table: Table,
    /// Minimum number of rows to draw. `None` uses the configured default.
    pub min_rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentGroup {
    /// Year label drawn across the group.
    pub label: String,
    /// Sub-columns, typically physical targets and cost.
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestmentTable {
    /// Leading columns whose header spans both header rows.
    pub columns: Vec<TableColumn>,
    pub groups: Vec<InvestmentGroup>,
    pub rows: Vec<Row>,
}

impl InvestmentTable {
    /// Leading columns followed by every group's sub-columns, left to right.
    pub fn flat_columns(&self) -> Vec<TableColumn> {
        self.columns
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.columns.iter()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_group_contains() {
        let group = HeaderGroup::new("Units", 2, 3);
        assert!(!group.contains(1));
        assert!(group.contains(2));
        assert!(group.contains(4));
        assert!(!group.contains(5));
    }

    #[test]
    fn row_from_pairs() {
        let row = Row::from_pairs([("office", json!("Registrar")), ("units", json!(3))]);
        assert_eq!(row.get("office"), Some(&json!("Registrar")));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn investment_flat_columns_order() {
        let table = InvestmentTable {
            columns: vec![TableColumn::new("item", "Item", 0.4)],
            groups: vec![
                InvestmentGroup {
                    label: "2024".into(),
                    columns: vec![
                        TableColumn::new("t1", "Targets", 0.15),
                        TableColumn::new("c1", "Cost", 0.15),
                    ],
                },
                InvestmentGroup {
                    label: "2025".into(),
                    columns: vec![
                        TableColumn::new("t2", "Targets", 0.15),
                        TableColumn::new("c2", "Cost", 0.15),
                    ],
                },
            ],
            rows: vec![],
        };
        let keys: Vec<_> = table.flat_columns().into_iter().map(|c| c.key).collect();
        assert_eq!(keys, ["item", "t1", "c1", "t2", "c2"]);
    }
}
