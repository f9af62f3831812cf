//! Inline formatting elements: `<b>`, `<span>`, `<a>`, `<code>`, `<br>` and friends.

use super::{block, process_children};
use crate::dom::{node, style};
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::helpers::{add_decorators, add_segment};
use crate::dom_to_model::stack::{stack_format, FormatPolicy, StackFormatOptions};
use crate::format::FormatCategory;
use crate::model::{BlockGroup, Br, Segment};
use markup5ever_rcdom::Handle;

/// Merge the element's segment format into the ambient one for its children. An inline tag
/// styled as a block is handled as a block instead.
pub fn format_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    if style::is_block_element(element) {
        block::block_processor(group, element, context);
        return;
    }

    let options = StackFormatOptions {
        segment: Some(FormatPolicy::ShallowClone),
        ..Default::default()
    };
    stack_format(context, options, |ctx| {
        parse_segment_format(element, ctx);
        process_children(group, element, ctx);
    });
}

fn parse_segment_format(element: &Handle, context: &mut DomToModelContext) {
    let tag = node::tag_name(element).unwrap_or_default();
    let mut format = context.segment_format.clone();
    context.parsers.parse(
        FormatCategory::Segment,
        &mut format,
        element,
        context,
        &style::default_style(&tag),
    );
    context.segment_format = format;
}

pub fn br_processor(group: &mut dyn BlockGroup, _: &Handle, context: &mut DomToModelContext) {
    let mut segment = Segment::Br(Br {
        format: context.segment_format.clone(),
        is_selected: context.is_in_selection,
        ..Br::default()
    });
    add_decorators(&mut segment, context);
    add_segment(group, segment, &context.block_format);
}

/// Anchors with an `href` become the ambient link of their content. Anchors without one
/// (named anchors) only contribute their segment format.
pub fn link_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    if !node::has_attribute(element, "href") {
        format_processor(group, element, context);
        return;
    }

    let options = StackFormatOptions {
        link: Some(FormatPolicy::LinkDefault),
        segment: Some(FormatPolicy::ShallowClone),
        ..Default::default()
    };
    stack_format(context, options, |ctx| {
        let defaults = style::default_style("a");
        let mut format = ctx.link.format.clone();
        ctx.parsers
            .parse(FormatCategory::Link, &mut format, element, ctx, &defaults);
        let mut dataset = ctx.link.dataset.clone();
        ctx.parsers
            .parse(FormatCategory::Dataset, &mut dataset, element, ctx, &defaults);
        ctx.link.format = format;
        ctx.link.dataset = dataset;

        process_children(group, element, ctx);
    });
}

pub fn code_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let options = StackFormatOptions {
        code: Some(FormatPolicy::CodeDefault),
        segment: Some(FormatPolicy::ShallowClone),
        ..Default::default()
    };
    stack_format(context, options, |ctx| {
        let defaults = style::default_style("code");
        let mut format = ctx.code.format.clone();
        ctx.parsers
            .parse(FormatCategory::Code, &mut format, element, ctx, &defaults);
        ctx.code.format = format;

        parse_segment_format(element, ctx);
        process_children(group, element, ctx);
    });
}
