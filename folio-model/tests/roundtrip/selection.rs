//! A selection read into the model and written back lands where it started.

use crate::common::{paragraph_shape, write_back};
use folio_model::dom::{node, tree, DomPoint, RangeSelection, TableSelection};
use folio_model::{dom_to_content_model, DomSelection, DomToModelOptions, MarkupTree};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

fn text_in_div(tree: &MarkupTree) -> Handle {
    let div = tree::first_child(tree.root()).unwrap();
    tree::first_child(&div).unwrap()
}

fn caret_at(html: &str, offset: usize) -> (MarkupTree, DomSelection) {
    let tree = MarkupTree::parse_fragment(html).unwrap();
    let text = text_in_div(&tree);
    let selection = DomSelection::Range(RangeSelection::caret(DomPoint::new(text, offset)));
    (tree, selection)
}

fn range(selection: Option<DomSelection>) -> RangeSelection {
    match selection {
        Some(DomSelection::Range(range)) => range,
        other => panic!("expected a range, got {other:?}"),
    }
}

#[test]
fn caret_survives_at_every_inner_offset() {
    for offset in 1..=6 {
        let (mut tree, selection) = caret_at("<div>abcdef</div>", offset);
        let options = DomToModelOptions::default();
        let mut model = dom_to_content_model(&mut tree, &options, Some(&selection));
        assert_eq!(paragraph_shape(&model).iter().filter(|s| *s == "|").count(), 1);

        let resolved = range(write_back(&mut tree, &mut model));
        assert!(resolved.is_collapsed);
        assert!(resolved.start.is_text());
        assert_eq!(node::text_of(&resolved.start.node).as_deref(), Some("abcdef"));
        assert_eq!(resolved.start.offset, offset, "offset {offset}");
    }
}

#[test]
fn reading_the_written_selection_gives_the_same_model() {
    let (mut tree, selection) = caret_at("<div>abcdef</div>", 3);
    let options = DomToModelOptions::default();
    let mut model = dom_to_content_model(&mut tree, &options, Some(&selection));
    let resolved = write_back(&mut tree, &mut model).unwrap();

    let again = dom_to_content_model(&mut tree, &options, Some(&resolved));
    assert_eq!(model, again);
}

#[test]
fn range_keeps_both_ends() {
    let mut tree = MarkupTree::parse_fragment("<div>abcdef</div>").unwrap();
    let text = text_in_div(&tree);
    let selection = DomSelection::Range(RangeSelection::new(
        DomPoint::new(text.clone(), 1),
        DomPoint::new(text, 4),
    ));
    let options = DomToModelOptions::default();
    let mut model = dom_to_content_model(&mut tree, &options, Some(&selection));
    assert_eq!(paragraph_shape(&model), vec!["a", "bcd", "ef"]);

    let resolved = range(write_back(&mut tree, &mut model));
    assert!(!resolved.is_collapsed);
    assert_eq!(resolved.start.offset, 1);
    assert_eq!(resolved.end.offset, 4);
    assert!(Rc::ptr_eq(&resolved.start.node, &resolved.end.node));
}

#[test]
fn table_selection_is_written_back_as_a_table_selection() {
    let html = "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>";
    let mut tree = MarkupTree::parse_fragment(html).unwrap();
    let table = tree::find_descendant(tree.root(), "table").unwrap();
    let selection = DomSelection::Table(TableSelection {
        table,
        first_column: 0,
        first_row: 1,
        last_column: 1,
        last_row: 1,
    });
    let options = DomToModelOptions::default();
    let mut model = dom_to_content_model(&mut tree, &options, Some(&selection));

    match write_back(&mut tree, &mut model) {
        Some(DomSelection::Table(written)) => {
            assert_eq!(
                (written.first_row, written.last_row, written.first_column, written.last_column),
                (1, 1, 0, 1)
            );
        }
        other => panic!("expected a table selection, got {other:?}"),
    }
}
