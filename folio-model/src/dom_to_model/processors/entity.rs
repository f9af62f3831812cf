//! Entities and their delimiters.
//!
//! An entity wrapper is opaque: its subtree is never walked, only a handle to the wrapper is
//! kept. Delimiters are the zero-width text holders a host puts around inline entities so the
//! caret has somewhere to go; they contribute selection markers but no content.

use crate::dom::{node, style, tree, StyleMap};
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::helpers::{add_block, add_decorators, add_segment, add_selection_marker};
use crate::dom_to_model::selection::{handle_regular_selection, text_selection_offsets};
use crate::format::FormatCategory;
use crate::model::{Block, BlockGroup, Entity, EntityInfo, FormatMap, Segment};
use markup5ever_rcdom::Handle;

pub fn entity_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let mut parsed = FormatMap::new();
    context.parsers.parse(
        FormatCategory::Entity,
        &mut parsed,
        element,
        context,
        &StyleMap::new(),
    );
    let entity_format = EntityInfo {
        id: parsed.get_str("id").map(str::to_string),
        entity_type: parsed.get_str("entityType").map(str::to_string),
        is_readonly: parsed.flag("isReadonly"),
    };
    let wrapper = context.nodes.register(element);

    if style::is_block_element(element) {
        let entity = Entity {
            wrapper,
            entity_format,
            format: FormatMap::new(),
            is_selected: context.is_in_selection,
            link: None,
            code: None,
        };
        add_block(group, Block::Entity(entity));
    } else {
        let mut segment = Segment::Entity(Entity {
            wrapper,
            entity_format,
            format: context.segment_format.clone(),
            is_selected: context.is_in_selection,
            link: None,
            code: None,
        });
        add_decorators(&mut segment, context);
        add_segment(group, segment, &context.block_format);
    }
}

/// Only range endpoints inside the delimiter are honored.
pub fn delimiter_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let children = tree::children(element);
    for (index, child) in children.iter().enumerate() {
        handle_regular_selection(index, element, group, context);
        if node::is_text(child) {
            text_endpoints(group, child, context);
        }
    }
    handle_regular_selection(children.len(), element, group, context);
}

fn text_endpoints(group: &mut dyn BlockGroup, text: &Handle, context: &mut DomToModelContext) {
    let (start, end) = text_selection_offsets(context, text, node::text_len(text));
    if start.is_some() {
        context.is_in_selection = true;
        add_selection_marker(group, context);
    }
    if end.is_some() {
        if !context.range.as_ref().is_some_and(|r| r.is_collapsed) {
            add_selection_marker(group, context);
        }
        context.is_in_selection = false;
    }
}
