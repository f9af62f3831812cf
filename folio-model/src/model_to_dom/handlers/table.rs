//! Tables
//!
//!     The dense grid is written back with spans: a cell covers every placeholder to its right
//!     (`span_left`) and below it (`span_above`), which becomes its `colspan`/`rowspan`.
//!     Placeholders themselves produce no element. Column widths go on the cells of the first
//!     row and row heights on the cells of the first column.

use super::{handle_block_group_children, reuse_cached_element};
use crate::dom::{node, style, tree};
use crate::format::FormatCategory;
use crate::model::{FormatMap, Table};
use crate::model_to_dom::context::{without_implied, ImplicitFormat, ModelToDomContext};
use crate::model_to_dom::ModelNodeKind;
use markup5ever_rcdom::Handle;

pub fn handle_table(
    parent: &Handle,
    table: &mut Table,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    if table.rows.is_empty() {
        tracing::debug!("skipping table without rows");
        return ref_node;
    }

    let mut ref_node = ref_node;
    let element = match context.cached(table.cached_element, "table") {
        Some(element) => {
            clear(&element);
            ref_node = reuse_cached_element(parent, &element, ref_node);
            element
        }
        None => {
            let element = node::create_element("table", vec![]);
            tree::insert_before(parent, &element, ref_node.as_ref());
            element
        }
    };

    let implied = context.implied("table", FormatCategory::Table);
    let table_format = without_implied(&table.format, &implied);
    context
        .appliers
        .apply(FormatCategory::Table, &table_format, &element, context);
    context
        .appliers
        .apply(FormatCategory::Dataset, &table.dataset, &element, context);
    table.cached_element = Some(context.nodes.register(&element));
    context.notify(ModelNodeKind::Table, &element);

    let tbody = node::create_element("tbody", vec![]);
    tree::append_child(&element, &tbody);

    let spans = cell_spans(table);
    let widths = table.widths.clone();
    let heights: Vec<f64> = table.rows.iter().map(|r| r.height).collect();

    for (row_index, row) in table.rows.iter_mut().enumerate() {
        let tr = match context.cached(row.cached_element, "tr") {
            Some(tr) => {
                clear(&tr);
                tr
            }
            None => node::create_element("tr", vec![]),
        };
        tree::append_child(&tbody, &tr);
        let implied = context.implied("tr", FormatCategory::TableRow);
        let row_format = without_implied(&row.format, &implied);
        context
            .appliers
            .apply(FormatCategory::TableRow, &row_format, &tr, context);
        row.cached_element = Some(context.nodes.register(&tr));
        context.notify(ModelNodeKind::TableRow, &tr);

        for (column_index, cell) in row.cells.iter_mut().enumerate() {
            if cell.span_left || cell.span_above {
                continue;
            }

            let tag = if cell.is_header { "th" } else { "td" };
            let td = match context.cached(cell.cached_element, tag) {
                Some(td) => {
                    clear(&td);
                    for attribute in ["colspan", "rowspan"] {
                        node::remove_attribute(&td, attribute);
                    }
                    td
                }
                None => node::create_element(tag, vec![]),
            };
            tree::append_child(&tr, &td);

            let (column_span, row_span) = spans[row_index][column_index];
            if column_span > 1 {
                node::set_attribute(&td, "colspan", &column_span.to_string());
            }
            if row_span > 1 {
                node::set_attribute(&td, "rowspan", &row_span.to_string());
            }

            if row_index == 0 {
                let width: f64 = widths.iter().skip(column_index).take(column_span).sum();
                if width > 0.0 {
                    style::set_style(&td, "width", &format!("{width}px"));
                }
            }
            if column_index == 0 {
                let height: f64 = heights.iter().skip(row_index).take(row_span).sum();
                if height > 0.0 {
                    style::set_style(&td, "height", &format!("{height}px"));
                }
            }

            let implied = context.implied(tag, FormatCategory::TableCell);
            let cell_format = without_implied(&cell.format, &implied);
            context
                .appliers
                .apply(FormatCategory::TableCell, &cell_format, &td, context);
            context
                .appliers
                .apply(FormatCategory::Dataset, &cell.dataset, &td, context);

            if cell.is_selected {
                context.selection.add_cell(&element, row_index, column_index);
            }

            let implicit = ImplicitFormat {
                segment: context.implied(tag, FormatCategory::Segment),
                block: FormatMap::new(),
            };
            context.with_implicit(implicit, |ctx| handle_block_group_children(&td, cell, ctx));

            cell.cached_element = Some(context.nodes.register(&td));
            context.notify(ModelNodeKind::TableCell, &td);
        }
    }

    ref_node
}

/// Drop the children and inline style of a reused element.
fn clear(element: &Handle) {
    for child in tree::children(element) {
        tree::remove(&child);
    }
    node::remove_attribute(element, "style");
}

/// `(colspan, rowspan)` of the cell at each grid slot, counting the placeholders it covers.
fn cell_spans(table: &Table) -> Vec<Vec<(usize, usize)>> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            (0..row.cells.len())
                .map(|column_index| {
                    let column_span = 1 + row.cells[column_index + 1..]
                        .iter()
                        .take_while(|c| c.span_left && !c.span_above)
                        .count();
                    let row_span = 1 + table.rows[row_index + 1..]
                        .iter()
                        .take_while(|r| {
                            r.cells
                                .get(column_index)
                                .is_some_and(|c| c.span_above && !c.span_left)
                        })
                        .count();
                    (column_span, row_span)
                })
                .collect()
        })
        .collect()
}
