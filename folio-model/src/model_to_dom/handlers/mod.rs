//! Block writers
//!
//!     Children of a block group are written in order against a moving reference node: the
//!     first existing child of the container that has not been accounted for yet. A block
//!     either reuses its cached element (moving it into place, or stepping over it when it is
//!     already there) or inserts a new element before the reference. Whatever is left from the
//!     reference onwards once all blocks are written does not belong to the model and is
//!     removed.

mod block;
mod list;
mod paragraph;
mod segment;
mod table;

pub use paragraph::handle_paragraph;

use super::context::ModelToDomContext;
use crate::dom::{tree, node};
use crate::dom_to_model::processors::is_entity;
use crate::model::{Block, BlockGroup, BlockGroupType};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

/// Write the blocks of `group` as the children of `parent`.
pub fn handle_block_group_children(
    parent: &Handle,
    group: &mut dyn BlockGroup,
    context: &mut ModelToDomContext<'_>,
) {
    let saved_stack = std::mem::take(&mut context.list.node_stack);
    let saved_counts = match group.group_type() {
        BlockGroupType::TableCell | BlockGroupType::FormatContainer | BlockGroupType::General => {
            Some(std::mem::take(&mut context.list.thread_counts))
        }
        BlockGroupType::Document | BlockGroupType::ListItem => None,
    };

    let mut ref_node = tree::first_child(parent);
    for block in group.blocks_mut() {
        if !matches!(block, Block::ListItem(_)) {
            context.list.node_stack.clear();
        }
        ref_node = handle_block(parent, block, context, ref_node);
    }

    while let Some(stale) = ref_node {
        ref_node = tree::next_sibling(&stale);
        tree::remove(&stale);
    }

    context.list.node_stack = saved_stack;
    if let Some(counts) = saved_counts {
        context.list.thread_counts = counts;
    }
}

/// Write one block before `ref_node`, returning the reference for the next block.
pub fn handle_block(
    parent: &Handle,
    block: &mut Block,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    match block {
        Block::Paragraph(paragraph) => handle_paragraph(parent, paragraph, context, ref_node),
        Block::Table(table) => table::handle_table(parent, table, context, ref_node),
        Block::Divider(divider) => block::handle_divider(parent, divider, context, ref_node),
        Block::Entity(entity) => block::handle_entity_block(parent, entity, context, ref_node),
        Block::FormatContainer(container) => {
            block::handle_format_container(parent, container, context, ref_node)
        }
        Block::ListItem(item) => list::handle_list_item(parent, item, context, ref_node),
        Block::General(general) => block::handle_general_block(parent, general, context, ref_node),
    }
}

/// Put a cached `element` in place under `parent` before `ref_node`.
///
/// When the element already lives in `parent`, the nodes between the reference and the element
/// are dropped (entity wrappers excepted) and the reference steps past it.
pub fn reuse_cached_element(
    parent: &Handle,
    element: &Handle,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    let mut ref_node = ref_node;

    if tree::is_child_of(element, parent) {
        while let Some(current) = ref_node.clone() {
            if Rc::ptr_eq(&current, element) || (node::is_element(&current) && is_entity(&current))
            {
                break;
            }
            ref_node = tree::next_sibling(&current);
            tree::remove(&current);
        }

        match &ref_node {
            Some(current) if Rc::ptr_eq(current, element) => {
                tracing::trace!("reusing cached element in place");
                ref_node = tree::next_sibling(current);
            }
            _ => tree::insert_before(parent, element, ref_node.as_ref()),
        }
    } else {
        tree::insert_before(parent, element, ref_node.as_ref());
    }

    ref_node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::{create_element, create_text};
    use crate::dom::tree::{append_child, children};

    #[test]
    fn reuse_in_place_drops_stale_nodes_before_it() {
        let parent = create_element("div", vec![]);
        let stale = create_text("old");
        let cached = create_element("p", vec![]);
        let after = create_element("span", vec![]);
        append_child(&parent, &stale);
        append_child(&parent, &cached);
        append_child(&parent, &after);

        let next = reuse_cached_element(&parent, &cached, Some(stale));
        assert!(Rc::ptr_eq(next.as_ref().unwrap(), &after));
        let kids = children(&parent);
        assert_eq!(kids.len(), 2);
        assert!(Rc::ptr_eq(&kids[0], &cached));
    }

    #[test]
    fn entity_wrappers_are_not_dropped() {
        let parent = create_element("div", vec![]);
        let entity = create_element("span", vec![("class", "_Entity _EType_x")]);
        let cached = create_element("p", vec![]);
        append_child(&parent, &entity);
        append_child(&parent, &cached);

        let next = reuse_cached_element(&parent, &cached, Some(entity.clone()));
        assert!(Rc::ptr_eq(next.as_ref().unwrap(), &entity));
        let kids = children(&parent);
        assert!(Rc::ptr_eq(&kids[0], &cached));
        assert!(Rc::ptr_eq(&kids[1], &entity));
    }

    #[test]
    fn foreign_element_is_inserted_before_reference() {
        let parent = create_element("div", vec![]);
        let existing = create_text("x");
        append_child(&parent, &existing);
        let element = create_element("p", vec![]);

        let next = reuse_cached_element(&parent, &element, Some(existing.clone()));
        assert!(Rc::ptr_eq(next.as_ref().unwrap(), &existing));
        assert!(Rc::ptr_eq(&children(&parent)[0], &element));
    }
}
