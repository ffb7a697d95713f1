use log::trace;

/// Tolerance for the sum of a table's width ratios.
const RATIO_TOLERANCE: f32 = 0.01;

/// Converts width ratios to point widths over `available_width`.
///
/// Every column but the last is rounded to a whole point; the last takes
/// what is left, so the widths always add up to `available_width` exactly
/// and the right border lands on the content edge.
pub fn resolve_column_widths(ratios: &[f32], available_width: f32) -> Vec<f32> {
    let Some((_, leading)) = ratios.split_last() else {
        return Vec::new();
    };
    debug_assert!(
        (ratios.iter().sum::<f32>() - 1.0).abs() <= RATIO_TOLERANCE,
        "column width ratios must sum to 1.0, got {:?}",
        ratios
    );

    let mut widths: Vec<f32> = leading
        .iter()
        .map(|ratio| (ratio * available_width).round())
        .collect();
    let used: f32 = widths.iter().sum();
    widths.push(available_width - used);
    trace!("Resolved column widths {:?} over {:.2}", widths, available_width);
    widths
}

/// Resolved horizontal geometry of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub left: f32,
    pub widths: Vec<f32>,
    /// Left edge of every column, followed by the table's right edge.
    pub edges: Vec<f32>,
}

impl ColumnLayout {
    pub fn new(left: f32, available_width: f32, ratios: &[f32]) -> Self {
        let widths = resolve_column_widths(ratios, available_width);
        let mut edges = Vec::with_capacity(widths.len() + 1);
        let mut x = left;
        edges.push(x);
        for (i, w) in widths.iter().enumerate() {
            x = if i + 1 == widths.len() {
                left + available_width
            } else {
                x + w
            };
            edges.push(x);
        }
        Self { left, widths, edges }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn x(&self, column: usize) -> f32 {
        self.edges[column]
    }

    pub fn right(&self) -> f32 {
        self.edges.last().copied().unwrap_or(self.left)
    }

    /// Width of `span` columns starting at `first`.
    pub fn span_width(&self, first: usize, span: usize) -> f32 {
        let last = (first + span).min(self.widths.len());
        self.edges[last] - self.edges[first]
    }
}
