//! Table grid reconstruction
//!
//!     A `<table>` becomes a dense grid: every row has the same number of cells, and a cell
//!     spanning several columns or rows is repeated into each covered slot as a placeholder
//!     marked `span_left` and/or `span_above`. Placeholders copy the origin cell's format and
//!     dataset but not its content.
//!
//!     Column and row positions are filled lazily from the measurer as cells are visited, then
//!     turned into sizes by walking backwards from the last known edge.

use super::process_children;
use crate::dom::{node, style, tree};
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::helpers::add_block;
use crate::dom_to_model::measure::BoxSize;
use crate::dom_to_model::selection::is_cell_selected;
use crate::dom_to_model::stack::{stack_format, FormatPolicy, StackFormatOptions};
use crate::format::FormatCategory;
use crate::model::{Block, BlockGroup, Table, TableCell, TableRow};
use markup5ever_rcdom::Handle;

const MAX_COLUMN_SPAN: usize = 1000;
const MAX_ROW_SPAN: usize = 65534;

pub fn table_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let options = StackFormatOptions {
        segment: Some(FormatPolicy::ShallowCloneForBlock),
        paragraph: Some(FormatPolicy::ShallowCloneForGroup),
        ..Default::default()
    };
    let table = stack_format(context, options, |ctx| build_table(element, ctx));
    add_block(group, Block::Table(table));
}

fn build_table(element: &Handle, context: &mut DomToModelContext) -> Table {
    let defaults = style::default_style("table");
    let mut table = Table::default();
    context
        .parsers
        .parse(FormatCategory::Table, &mut table.format, element, context, &defaults);
    context
        .parsers
        .parse(FormatCategory::Dataset, &mut table.dataset, element, context, &defaults);
    table.cached_element = context.cache(element);

    let rows = table_rows(element);
    let row_count = rows.len();
    let mut grid: Vec<Vec<Option<TableCell>>> = vec![Vec::new(); row_count];
    let mut column_positions: Vec<Option<f64>> = vec![Some(0.0)];
    let mut row_positions: Vec<Option<f64>> = vec![Some(0.0)];

    for (row_index, tr) in rows.iter().enumerate() {
        let mut target_column = 0;

        for td in tree::children(tr).iter().filter(|c| is_cell(c)) {
            while matches!(grid[row_index].get(target_column), Some(Some(_))) {
                target_column += 1;
            }

            let column_span = span_attribute(td, "colspan", MAX_COLUMN_SPAN);
            let row_span = span_attribute(td, "rowspan", MAX_ROW_SPAN).min(row_count - row_index);

            measure(
                context,
                td,
                &mut column_positions,
                target_column,
                column_span,
                |size| size.width,
            );
            measure(
                context,
                td,
                &mut row_positions,
                row_index,
                row_span,
                |size| size.height,
            );

            let origin = build_cell(td, element, row_index, target_column, context);
            let format = origin.format.clone();
            let dataset = origin.dataset.clone();
            let is_header = origin.is_header;
            put(&mut grid[row_index], target_column, origin);

            for dr in 0..row_span {
                for dc in 0..column_span {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let row = row_index + dr;
                    let column = target_column + dc;
                    let placeholder = TableCell {
                        format: format.clone(),
                        dataset: dataset.clone(),
                        span_left: dc > 0,
                        span_above: dr > 0,
                        is_header,
                        is_selected: is_cell_selected(context, element, row, column),
                        ..TableCell::default()
                    };
                    put(&mut grid[row], column, placeholder);
                }
            }

            target_column += column_span;
        }
    }

    let column_count = grid.iter().map(Vec::len).max().unwrap_or(0);

    for (cells, tr) in grid.into_iter().zip(rows.iter()) {
        let mut row = TableRow::default();
        context.parsers.parse(
            FormatCategory::TableRow,
            &mut row.format,
            tr,
            context,
            &style::default_style("tr"),
        );
        row.cached_element = context.cache(tr);
        row.cells = cells.into_iter().map(Option::unwrap_or_default).collect();
        row.cells.resize_with(column_count, TableCell::default);
        table.rows.push(row);
    }

    column_positions.resize(column_count + 1, None);
    row_positions.resize(row_count + 1, None);
    table.widths = calc_sizes(&column_positions);
    for (row, height) in table.rows.iter_mut().zip(calc_sizes(&row_positions)) {
        row.height = height;
    }

    table
}

fn build_cell(
    td: &Handle,
    table: &Handle,
    row: usize,
    column: usize,
    context: &mut DomToModelContext,
) -> TableCell {
    let tag = node::tag_name(td).unwrap_or_default();
    let defaults = style::default_style(&tag);
    let mut cell = TableCell {
        is_header: tag == "th",
        is_selected: is_cell_selected(context, table, row, column),
        ..TableCell::default()
    };
    context
        .parsers
        .parse(FormatCategory::TableCell, &mut cell.format, td, context, &defaults);
    context
        .parsers
        .parse(FormatCategory::Dataset, &mut cell.dataset, td, context, &defaults);

    let options = StackFormatOptions {
        paragraph: Some(FormatPolicy::Empty),
        segment: Some(FormatPolicy::ShallowCloneForBlock),
        list: Some(FormatPolicy::Empty),
        link: Some(FormatPolicy::Empty),
        code: Some(FormatPolicy::Empty),
        ..Default::default()
    };
    stack_format(context, options, |ctx| {
        let mut segment_format = ctx.segment_format.clone();
        ctx.parsers.parse(
            FormatCategory::SegmentOnTableCell,
            &mut segment_format,
            td,
            ctx,
            &defaults,
        );
        ctx.segment_format = segment_format;
        process_children(&mut cell, td, ctx);
    });

    cell.cached_element = context.cache(td);
    cell
}

fn is_cell(node_ref: &Handle) -> bool {
    node::is_tag(node_ref, "td") || node::is_tag(node_ref, "th")
}

/// `<tr>` elements directly under the table or one of its row groups, in document order.
fn table_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in tree::children(table) {
        if node::is_tag(&child, "tr") {
            rows.push(child);
        } else if ["thead", "tbody", "tfoot"]
            .iter()
            .any(|tag| node::is_tag(&child, tag))
        {
            rows.extend(
                tree::children(&child)
                    .into_iter()
                    .filter(|c| node::is_tag(c, "tr")),
            );
        }
    }
    rows
}

/// A `colspan`/`rowspan` value; anything below 1 or unparsable counts as 1, anything above
/// `max` is clamped to it as browsers do.
fn span_attribute(cell: &Handle, name: &str, max: usize) -> usize {
    node::get_attribute(cell, name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .map_or(1, |n| n.min(max))
}

fn put(row: &mut Vec<Option<TableCell>>, column: usize, cell: TableCell) {
    if row.len() <= column {
        row.resize_with(column + 1, || None);
    }
    row[column] = Some(cell);
}

/// Record the far edge of a cell when it is not known yet and the near edge is.
fn measure(
    context: &DomToModelContext,
    cell: &Handle,
    positions: &mut Vec<Option<f64>>,
    start: usize,
    span: usize,
    pick: fn(&BoxSize) -> f64,
) {
    let end = start + span;
    if positions.len() <= end {
        positions.resize(end + 1, None);
    }
    if positions[end].is_some() {
        return;
    }
    let Some(origin) = positions[start] else {
        return;
    };
    if let Some(size) = context.measurer.measure(cell) {
        positions[end] = Some(origin + pick(&size));
    }
}

/// Turn edge positions into sizes, walking backwards from the last edge. An unknown edge
/// yields size 0 and does not move the reference edge.
pub(crate) fn calc_sizes(positions: &[Option<f64>]) -> Vec<f64> {
    let count = positions.len().saturating_sub(1);
    let mut result = vec![0.0; count];
    let mut last = positions.last().copied().flatten();
    for i in (0..count).rev() {
        if let Some(position) = positions[i] {
            result[i] = last.unwrap_or(position) - position;
            last = Some(position);
        }
    }
    result
}
