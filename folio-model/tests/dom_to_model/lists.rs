//! List nesting and numbering threads.

use crate::common::{convert, list_items};
use folio_model::dom_to_model::processors::START_NUMBER_OVERRIDE;
use folio_model::model::ListType;

fn nested_list(depth: usize) -> String {
    let mut html = String::new();
    for level in 0..depth {
        html.push_str(&format!("<ol><li>item {level}"));
    }
    for _ in 0..depth {
        html.push_str("</li></ol>");
    }
    html
}

#[test]
fn nesting_depth_is_the_number_of_levels() {
    for depth in 1..=6 {
        let (_, model) = convert(&nested_list(depth));
        let items = list_items(&model.blocks);
        assert_eq!(items.len(), depth);
        let depths: Vec<usize> = items.iter().map(|item| item.levels.len()).collect();
        assert_eq!(depths, (1..=depth).collect::<Vec<_>>());
    }
}

#[test]
fn mixed_list_types_keep_their_chain() {
    let (_, model) = convert("<ul><li>a<ol><li>b<ul><li>c</li></ul></li></ol></li></ul>");
    let items = list_items(&model.blocks);
    let chain: Vec<ListType> = items[2].levels.iter().map(|level| level.list_type).collect();
    assert_eq!(
        chain,
        vec![ListType::Unordered, ListType::Ordered, ListType::Unordered]
    );
}

#[test]
fn new_list_after_an_interruption_restarts() {
    let (_, model) = convert("<ol><li>a</li><li>b</li></ol><div>x</div><ol><li>c</li></ol>");
    let items = list_items(&model.blocks);
    assert_eq!(items.len(), 3);
    assert_eq!(
        items[2].levels[0].format.get_number(START_NUMBER_OVERRIDE),
        Some(1.0)
    );
}

#[test]
fn explicit_start_that_continues_is_not_an_override() {
    let (_, model) = convert("<ol><li>a</li></ol><div>x</div><ol start=\"2\"><li>b</li></ol>");
    let items = list_items(&model.blocks);
    assert!(!items[1].levels[0].format.contains(START_NUMBER_OVERRIDE));
}
