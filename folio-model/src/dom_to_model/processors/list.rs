//! Lists
//!
//!     `<ol>`/`<ul>` push a [`ListLevel`] for the duration of their children; each `<li>` becomes
//!     a flat [`ListItem`] carrying a clone of the level stack. Nested lists do not nest in the
//!     model: their items follow the enclosing item in the same group, distinguished by depth.
//!
//!     Ordered numbering is tracked per depth in a thread of counters, so a list that merely
//!     continues the previous one (`<ol start="4">` after three items) loses its explicit start
//!     while a real restart keeps it.

use super::{block, process_children};
use crate::dom::{node, style};
use crate::dom_to_model::context::{DomToModelContext, ListContext};
use crate::dom_to_model::helpers::add_block;
use crate::dom_to_model::stack::{stack_format, FormatPolicy, StackFormatOptions};
use crate::format::FormatCategory;
use crate::model::{Block, BlockGroup, FormatMap, ListItem, ListLevel, ListType};
use markup5ever_rcdom::Handle;
use serde::Deserialize;

/// Dataset key of the list metadata JSON (`data-editing-info`).
pub const LIST_METADATA_KEY: &str = "editing-info";

/// Level format key of an explicit ordered list start.
pub const START_NUMBER_OVERRIDE: &str = "startNumberOverride";

const ORDERED_STYLES: [&str; 5] = [
    "decimal",
    "lower-alpha",
    "upper-alpha",
    "lower-roman",
    "upper-roman",
];
const UNORDERED_STYLES: [&str; 3] = ["disc", "circle", "square"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListMetadata {
    ordered_style_type: Option<i64>,
    unordered_style_type: Option<i64>,
}

pub fn list_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let tag = node::tag_name(element).unwrap_or_default();
    let Some(list_type) = ListType::from_tag(&tag) else {
        process_children(group, element, context);
        return;
    };
    let defaults = style::default_style(&tag);

    let options = StackFormatOptions {
        segment: Some(FormatPolicy::ShallowCloneForBlock),
        paragraph: Some(FormatPolicy::ShallowCloneForGroup),
        ..Default::default()
    };
    stack_format(context, options, |ctx| {
        let mut segment_format = ctx.segment_format.clone();
        ctx.parsers.parse(
            FormatCategory::SegmentOnBlock,
            &mut segment_format,
            element,
            ctx,
            &defaults,
        );
        ctx.segment_format = segment_format;

        let mut level = ListLevel {
            list_type,
            format: ctx.block_format.clone(),
            dataset: FormatMap::new(),
        };
        ctx.parsers
            .parse(FormatCategory::ListLevel, &mut level.format, element, ctx, &defaults);
        ctx.parsers
            .parse(FormatCategory::Dataset, &mut level.dataset, element, ctx, &defaults);
        ctx.parsers.parse(
            FormatCategory::ListLevelThread,
            &mut level.format,
            element,
            ctx,
            &defaults,
        );

        reconcile_thread(&mut ctx.list, &mut level);
        apply_list_metadata(&mut level);

        ctx.list.levels.push(level);
        process_children(group, element, ctx);
        ctx.list.levels.pop();
    });
}

/// Align the thread counter of the new level's depth with its start number.
fn reconcile_thread(list: &mut ListContext, level: &mut ListLevel) {
    let depth = list.levels.len();
    list.thread_counts.truncate(depth + 1);
    list.thread_counts.resize(depth + 1, 0);

    if level.list_type != ListType::Ordered {
        return;
    }

    let count = &mut list.thread_counts[depth];
    match level.format.get_number(START_NUMBER_OVERRIDE) {
        Some(start) => {
            let start = start as u32;
            if start == count.saturating_add(1) {
                level.format.remove(START_NUMBER_OVERRIDE);
            }
            *count = start.saturating_sub(1);
        }
        None => {
            if *count > 0 {
                level.format.set(START_NUMBER_OVERRIDE, 1.0);
            }
            *count = 0;
        }
    }
}

/// Map the style type stored in the list metadata onto `listStyleType`. Values that cannot be
/// understood are dropped without affecting the rest of the list.
fn apply_list_metadata(level: &mut ListLevel) {
    let Some(raw) = level.dataset.get_str(LIST_METADATA_KEY).map(str::to_string) else {
        return;
    };

    let metadata = match serde_json::from_str::<ListMetadata>(&raw) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::debug!(error = %e, "dropping malformed list metadata");
            level.dataset.remove(LIST_METADATA_KEY);
            return;
        }
    };

    let (value, styles): (Option<i64>, &[&str]) = match level.list_type {
        ListType::Ordered => (metadata.ordered_style_type, &ORDERED_STYLES[..]),
        ListType::Unordered => (metadata.unordered_style_type, &UNORDERED_STYLES[..]),
    };
    let Some(value) = value else {
        return;
    };

    let style = usize::try_from(value)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| styles.get(i));
    match style {
        Some(style) => level.format.set("listStyleType", *style),
        None => tracing::debug!(value, "ignoring out of range list style type"),
    }
}

pub fn list_item_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    if context.list.levels.is_empty() {
        block::block_processor(group, element, context);
        return;
    }

    let levels = context.list.levels.clone();
    let depth = levels.len();
    if levels.last().is_some_and(|l| l.list_type == ListType::Ordered) {
        if context.list.thread_counts.len() < depth {
            context.list.thread_counts.resize(depth, 0);
        }
        let count = &mut context.list.thread_counts[depth - 1];
        *count = count.saturating_add(1);
    }
    if let Some(live) = context.list.levels.last_mut() {
        live.format.remove(START_NUMBER_OVERRIDE);
    }

    let slot = context.list.staged.len();
    context.list.staged.push(None);
    context.list.open_items += 1;

    let defaults = style::default_style("li");
    let options = StackFormatOptions {
        segment: Some(FormatPolicy::ShallowCloneForBlock),
        paragraph: Some(FormatPolicy::ShallowCloneForGroup),
        ..Default::default()
    };
    let item = stack_format(context, options, |ctx| {
        let mut segment_format = ctx.segment_format.clone();
        ctx.parsers.parse(
            FormatCategory::SegmentOnBlock,
            &mut segment_format,
            element,
            ctx,
            &defaults,
        );
        ctx.segment_format = segment_format;

        let mut item = ListItem::new(levels, ctx.segment_format.clone());
        ctx.parsers.parse(
            FormatCategory::ListItemElement,
            &mut item.format,
            element,
            ctx,
            &defaults,
        );
        ctx.block_format = FormatMap::new();

        process_children(&mut item, element, ctx);
        item
    });

    if let Some(entry) = context.list.staged.get_mut(slot) {
        *entry = Some(item);
    }
    context.list.open_items -= 1;

    if context.list.open_items == 0 {
        let staged = std::mem::take(&mut context.list.staged);
        for item in staged.into_iter().flatten() {
            add_block(group, Block::ListItem(item));
        }
    }
}
