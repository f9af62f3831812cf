//! Lists
//!
//!     Consecutive list items share list elements through the context's node stack: the
//!     leading levels an item has in common with the stack are reused and the rest are created.
//!     A nested list is appended to the list element above it.
//!
//!     Ordered numbering follows the thread counters: a level without an explicit start
//!     continues from the previous list at the same depth.

use super::handle_block_group_children;
use crate::dom::{node, tree};
use crate::dom_to_model::processors::START_NUMBER_OVERRIDE;
use crate::format::FormatCategory;
use crate::model::{FormatMap, ListItem, ListLevel, ListType};
use crate::model_to_dom::context::{
    without_implied, ImplicitFormat, ListStackEntry, ModelToDomContext,
};
use crate::model_to_dom::ModelNodeKind;
use markup5ever_rcdom::Handle;

pub fn handle_list_item(
    parent: &Handle,
    item: &mut ListItem,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    if context.list.node_stack.is_empty() {
        context.list.node_stack.push(ListStackEntry {
            level: None,
            node: parent.clone(),
        });
    }

    let reused = shared_levels(&context.list.node_stack, &item.levels);
    context.list.node_stack.truncate(reused + 1);

    for depth in reused..item.levels.len() {
        let list = create_list(&item.levels[depth], depth, context, ref_node.as_ref());
        context.list.node_stack.push(ListStackEntry {
            level: Some(item.levels[depth].clone()),
            node: list,
        });
    }

    let li = node::create_element("li", vec![]);
    insert_into_stack(&li, context, ref_node.as_ref());

    let implied = context.implied("li", FormatCategory::ListItemElement);
    let item_format = without_implied(&item.format, &implied);
    context
        .appliers
        .apply(FormatCategory::ListItemElement, &item_format, &li, context);

    let implied = context.implied("li", FormatCategory::SegmentOnBlock);
    let holder_format = without_implied(&item.format_holder.format, &implied);
    context
        .appliers
        .apply(FormatCategory::SegmentOnBlock, &holder_format, &li, context);

    if let Some(level) = item.levels.last() {
        if level.list_type == ListType::Ordered {
            let depth = item.levels.len() - 1;
            let counts = &mut context.list.thread_counts;
            counts.resize(counts.len().max(depth + 1), 0);
            counts[depth] = counts[depth].saturating_add(1);
        }
    }
    context.notify(ModelNodeKind::ListItem, &li);

    let mut segment = context.implied("li", FormatCategory::Segment);
    segment.extend_from(&item.format_holder.format);
    let implicit = ImplicitFormat {
        segment,
        block: FormatMap::new(),
    };
    context.with_implicit(implicit, |ctx| handle_block_group_children(&li, item, ctx));

    ref_node
}

/// How many leading levels of `levels` the open lists already provide. A level with an
/// explicit start always opens a new list.
fn shared_levels(stack: &[ListStackEntry], levels: &[ListLevel]) -> usize {
    levels
        .iter()
        .zip(stack.iter().skip(1))
        .take_while(|(level, entry)| {
            entry.level.as_ref().map(|open| open.list_type) == Some(level.list_type)
                && !level.format.contains(START_NUMBER_OVERRIDE)
        })
        .count()
}

fn create_list(
    level: &ListLevel,
    depth: usize,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<&Handle>,
) -> Handle {
    let tag = level.list_type.tag_name();
    let list = node::create_element(tag, vec![]);
    insert_into_stack(&list, context, ref_node);

    let counts = &mut context.list.thread_counts;
    counts.resize(counts.len().max(depth + 1), 0);
    if level.list_type == ListType::Ordered {
        let start = level
            .format
            .get_number(START_NUMBER_OVERRIDE)
            .map(|n| n as u32)
            .unwrap_or(counts[depth].saturating_add(1));
        counts[depth] = start.saturating_sub(1);
        counts.truncate(depth + 1);

        let mut thread = FormatMap::new();
        thread.set(START_NUMBER_OVERRIDE, f64::from(start));
        context
            .appliers
            .apply(FormatCategory::ListLevelThread, &thread, &list, context);
    }

    let implied = context.implied(tag, FormatCategory::ListLevel);
    let level_format = without_implied(&level.format.without(&[START_NUMBER_OVERRIDE]), &implied);
    context
        .appliers
        .apply(FormatCategory::ListLevel, &level_format, &list, context);
    context
        .appliers
        .apply(FormatCategory::Dataset, &level.dataset, &list, context);

    context.notify(ModelNodeKind::List, &list);
    list
}

/// The outermost list goes before the reference node; everything else is appended to the
/// innermost open list.
fn insert_into_stack(node: &Handle, context: &ModelToDomContext<'_>, ref_node: Option<&Handle>) {
    let stack = &context.list.node_stack;
    match stack.last() {
        Some(entry) if stack.len() == 1 => tree::insert_before(&entry.node, node, ref_node),
        Some(entry) => tree::append_child(&entry.node, node),
        None => {}
    }
}
