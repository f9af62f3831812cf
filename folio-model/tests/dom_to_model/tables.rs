//! Table grid reconstruction through the public entry point.

use crate::common::{convert, convert_with, first_table};
use folio_model::dom_to_model::{BoxMeasurer, BoxSize};
use folio_model::model::Table;
use folio_model::DomToModelOptions;
use markup5ever_rcdom::Handle;
use std::rc::Rc;

const LAYOUTS: [&str; 4] = [
    "<table><tr><td>a</td></tr></table>",
    "<table><tr><td colspan=\"2\" rowspan=\"2\">a</td><td>b</td></tr>\
     <tr><td>c</td></tr><tr><td>d</td><td>e</td><td>f</td></tr></table>",
    "<table><thead><tr><th>h1</th><th>h2</th><th>h3</th></tr></thead>\
     <tbody><tr><td rowspan=\"5\">a</td><td colspan=\"4\">b</td></tr>\
     <tr><td>c</td></tr></tbody></table>",
    "<table><tr><td>a</td></tr><tr><td>b</td><td>c</td><td>d</td></tr><tr></tr></table>",
];

fn column_count(table: &Table) -> usize {
    table.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
}

#[test]
fn every_row_has_the_same_number_of_cells() {
    for html in LAYOUTS {
        let (_, model) = convert(html);
        let table = first_table(&model);
        let columns = column_count(table);
        assert!(
            table.rows.iter().all(|row| row.cells.len() == columns),
            "ragged grid for {html}"
        );
        assert_eq!(table.widths.len(), columns, "widths for {html}");
    }
}

#[test]
fn spanned_positions_point_back_to_their_origin() {
    let (_, model) = convert(LAYOUTS[1]);
    let table = first_table(&model);
    let flags: Vec<Vec<(bool, bool)>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|c| (c.span_left, c.span_above)).collect())
        .collect();
    assert_eq!(
        flags,
        vec![
            vec![(false, false), (true, false), (false, false)],
            vec![(false, true), (true, true), (false, false)],
            vec![(false, false), (false, false), (false, false)],
        ]
    );

    let origin_text: Vec<bool> = table.rows[1]
        .cells
        .iter()
        .map(|cell| cell.blocks.is_empty())
        .collect();
    assert_eq!(origin_text, vec![true, true, false]);
}

#[test]
fn header_rows_inside_row_groups_are_kept_in_order() {
    let (_, model) = convert(LAYOUTS[2]);
    let table = first_table(&model);
    assert_eq!(table.rows.len(), 3);
    assert!(table.rows[0].cells.iter().take(3).all(|cell| cell.is_header));
    assert_eq!(column_count(table), 5);
    // rowspan is clamped to the rows that exist
    assert!(table.rows[2].cells[0].span_above);
}

struct FixedMeasurer;

impl BoxMeasurer for FixedMeasurer {
    fn measure(&self, _: &Handle) -> Option<BoxSize> {
        Some(BoxSize {
            width: 30.0,
            height: 10.0,
        })
    }
}

#[test]
fn host_measurer_supplies_sizes() {
    let options = DomToModelOptions {
        measurer: Some(Rc::new(FixedMeasurer)),
        ..DomToModelOptions::default()
    };
    let (_, model) = convert_with(
        "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>",
        &options,
        None,
    );
    let table = first_table(&model);
    assert_eq!(table.widths, vec![30.0, 30.0]);
    let heights: Vec<f64> = table.rows.iter().map(|row| row.height).collect();
    assert_eq!(heights, vec![10.0, 10.0]);
}
