//! Mapping the live range onto model positions.
//!
//! A range endpoint is either (element, child index) or (text node, character offset). Child
//! indices are checked by the child processor before each child and once after the last;
//! character offsets are handled by the text processor when it splits a run.

use super::context::DomToModelContext;
use super::helpers::add_selection_marker;
use crate::model::BlockGroup;
use markup5ever_rcdom::Handle;
use std::rc::Rc;

/// Open or close the selection when a range endpoint sits at `index` inside `parent`.
pub fn handle_regular_selection(
    index: usize,
    parent: &Handle,
    group: &mut dyn BlockGroup,
    context: &mut DomToModelContext,
) {
    let (at_start, at_end, collapsed) = match &context.range {
        Some(range) => (
            Rc::ptr_eq(&range.start.node, parent) && range.start.offset == index,
            Rc::ptr_eq(&range.end.node, parent) && range.end.offset == index,
            range.is_collapsed,
        ),
        None => return,
    };

    if at_start {
        context.is_in_selection = true;
        add_selection_marker(group, context);
    }

    if at_end {
        if !collapsed {
            add_selection_marker(group, context);
        }
        context.is_in_selection = false;
    }
}

/// Range endpoints local to a text node, clamped to its length (in characters).
pub fn text_selection_offsets(
    context: &DomToModelContext,
    text_node: &Handle,
    length: usize,
) -> (Option<usize>, Option<usize>) {
    match &context.range {
        Some(range) => {
            let start = Rc::ptr_eq(&range.start.node, text_node)
                .then(|| range.start.offset.min(length));
            let end =
                Rc::ptr_eq(&range.end.node, text_node).then(|| range.end.offset.min(length));
            (start, end)
        }
        None => (None, None),
    }
}

/// Whether a table grid coordinate falls inside the live table selection of `table`.
pub fn is_cell_selected(
    context: &DomToModelContext,
    table: &Handle,
    row: usize,
    column: usize,
) -> bool {
    context
        .table_selection
        .as_ref()
        .is_some_and(|s| Rc::ptr_eq(&s.table, table) && s.contains(row, column))
}

pub fn is_image_selected(context: &DomToModelContext, image: &Handle) -> bool {
    context
        .image_selection
        .as_ref()
        .is_some_and(|s| Rc::ptr_eq(&s.image, image))
}
