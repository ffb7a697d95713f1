use crate::LayoutError;
use crate::controller::PageController;
use crate::format::format_value;
use crate::painting::borders::{VerticalAlign, cell_text, column_rules, hline, vline};
use crate::table::{ColumnLayout, TableOutcome};
use crate::text::notice;
use issp_idf::LabelValueRow;
use issp_types::Rect;
use log::{debug, warn};

struct RowPlan {
    height: f32,
    /// Heights of the nested sub-rows; empty for a plain value row.
    sub_heights: Vec<f32>,
}

/// Label column on the left, value or nested sub-rows on the right.
///
/// A nested row is one bordered cell pair whose height is the sum of its
/// sub-rows. Its outer rules are stroked once over the full height, with
/// internal dividers between sub-rows and one vertical divider between
/// sub-label and sub-value.
pub fn render_label_value(
    pc: &mut PageController<'_>,
    rows: &[LabelValueRow],
) -> Result<TableOutcome, LayoutError> {
    let mut outcome = TableOutcome::default();
    if rows.is_empty() {
        notice(pc, 0.0)?;
        return Ok(outcome);
    }

    let config = pc.config();
    let cursor = pc.cursor();
    let label_ratio = config.table.label_ratio;
    let sub_ratio = config.table.sub_label_ratio;
    let outer = ColumnLayout::new(cursor.left, cursor.content_width, &[label_ratio, 1.0 - label_ratio]);
    let inner = ColumnLayout::new(outer.x(1), outer.widths[1], &[sub_ratio, 1.0 - sub_ratio]);
    let padding = config.table.cell_padding;
    let label_style = config.table_style().bold();
    let value_style = config.table_style();
    let stroke = config.border_stroke();
    let max_height = pc.full_page_height();

    let measure = |pc: &PageController<'_>, text: &str, width: f32, bold: bool| {
        let style = if bold { &label_style } else { &value_style };
        pc.measure_text_height(text, (width - 2.0 * padding).max(1.0), style) + 2.0 * padding
    };

    let view: &PageController<'_> = pc;
    let plans: Vec<RowPlan> = rows
        .iter()
        .map(|row| {
            let label_height = measure(view, &row.label, outer.widths[0], true);
            if row.sub_rows.is_empty() {
                let value_height = measure(view, &format_value(&row.value), outer.widths[1], false);
                let height = row
                    .height
                    .unwrap_or_else(|| label_height.max(value_height).max(config.table.label_row_height));
                return RowPlan {
                    height: height.min(max_height),
                    sub_heights: Vec::new(),
                };
            }

            let mut sub_heights: Vec<f32> = row
                .sub_rows
                .iter()
                .map(|sub| {
                    sub.height.unwrap_or_else(|| {
                        measure(view, &sub.label, inner.widths[0], true)
                            .max(measure(view, &format_value(&sub.value), inner.widths[1], false))
                            .max(config.table.sub_row_height)
                    })
                })
                .collect();
            let sum: f32 = sub_heights.iter().sum();
            let height = sum.max(label_height).max(row.height.unwrap_or(0.0));
            if let Some(last) = sub_heights.last_mut() {
                *last += height - sum;
            }
            if height > max_height {
                warn!("Label-value row '{}' of height {:.2} exceeds the page", row.label, height);
                let mut left = max_height;
                for h in &mut sub_heights {
                    *h = h.min(left);
                    left -= *h;
                }
            }
            RowPlan {
                height: height.min(max_height),
                sub_heights,
            }
        })
        .collect();

    let start_page = pc.cursor().page_index;
    for (i, (row, plan)) in rows.iter().zip(&plans).enumerate() {
        let broke = pc.ensure_space(plan.height)?;
        let y = pc.cursor().y;
        if i == 0 || broke {
            hline(pc, outer.left, outer.right(), y, &stroke)?;
        }

        cell_text(
            pc,
            &row.label,
            Rect::new(outer.x(0), y, outer.widths[0], plan.height),
            padding,
            &label_style,
            VerticalAlign::Top,
        )?;

        if plan.sub_heights.is_empty() {
            let value = format_value(&row.value);
            let cell = Rect::new(outer.x(1), y, outer.widths[1], plan.height);
            cell_text(pc, &value, cell, padding, &value_style, VerticalAlign::Top)?;
        } else {
            vline(pc, inner.x(1), y, y + plan.height, &stroke)?;
            let mut sub_y = y;
            let last = plan.sub_heights.len() - 1;
            for (k, (sub, &h)) in row.sub_rows.iter().zip(&plan.sub_heights).enumerate() {
                let label_cell = Rect::new(inner.x(0), sub_y, inner.widths[0], h);
                cell_text(pc, &sub.label, label_cell, padding, &label_style, VerticalAlign::Top)?;
                let value_cell = Rect::new(inner.x(1), sub_y, inner.widths[1], h);
                cell_text(pc, &format_value(&sub.value), value_cell, padding, &value_style, VerticalAlign::Top)?;
                sub_y += h;
                if k < last {
                    hline(pc, inner.left, inner.right(), sub_y, &stroke)?;
                }
            }
        }

        column_rules(pc, outer.edges.iter().copied(), y, y + plan.height, &stroke)?;
        hline(pc, outer.left, outer.right(), y + plan.height, &stroke)?;
        pc.advance(plan.height);
        outcome.rows_drawn += 1;
    }

    outcome.pages = pc.cursor().page_index - start_page + 1;
    pc.advance(config.spacing.table_gap);
    debug!("Label-value table drew {} rows", outcome.rows_drawn);
    Ok(outcome)
}
