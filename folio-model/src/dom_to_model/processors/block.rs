//! Block elements: `<div>` and friends, `<p>`/headings, `<blockquote>`/`<pre>`, `<hr>`.

use super::process_children;
use crate::dom::{node, style};
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::helpers::add_block;
use crate::dom_to_model::stack::{stack_format, FormatPolicy, StackFormatOptions};
use crate::format::FormatCategory;
use crate::model::{
    Block, BlockGroup, Divider, FormatContainer, FormatMap, Paragraph, ParagraphDecorator,
};
use markup5ever_rcdom::Handle;

pub fn block_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    process_block(group, element, context, None);
}

/// `<p>` and `<h1>`..`<h6>`: the tag and its segment-on-block format become a paragraph
/// decorator, so headings keep their default size and weight out of the segments.
pub fn decorated_block_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let tag = node::tag_name(element).unwrap_or_default();
    let mut format = FormatMap::new();
    context.parsers.parse(
        FormatCategory::SegmentOnBlock,
        &mut format,
        element,
        context,
        &style::default_style(&tag),
    );

    let decorator = ParagraphDecorator {
        tag_name: tag,
        format,
    };
    process_block(group, element, context, Some(decorator));
}

/// Open an explicit paragraph for the element and process its children into the group.
/// Content following the element starts in a fresh implicit paragraph.
fn process_block(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
    decorator: Option<ParagraphDecorator>,
) {
    let tag = node::tag_name(element).unwrap_or_default();
    let defaults = style::default_style(&tag);

    let options = StackFormatOptions {
        segment: Some(FormatPolicy::ShallowCloneForBlock),
        paragraph: Some(FormatPolicy::ShallowCloneForGroup),
        block_decorator: Some(FormatPolicy::Empty),
        ..Default::default()
    };
    stack_format(context, options, |ctx| {
        let mut block_format = ctx.block_format.clone();
        ctx.parsers
            .parse(FormatCategory::Block, &mut block_format, element, ctx, &defaults);
        ctx.block_format = block_format;

        let mut segment_format = ctx.segment_format.clone();
        match &decorator {
            None => ctx.parsers.parse(
                FormatCategory::SegmentOnBlock,
                &mut segment_format,
                element,
                ctx,
                &defaults,
            ),
            Some(decorator) => segment_format.retain(|key, _| !decorator.format.contains(key)),
        }
        ctx.segment_format = segment_format;
        ctx.block_decorator = decorator.clone();

        let mut paragraph = Paragraph::new(false, ctx.block_format.clone())
            .with_decorator(decorator.clone());
        paragraph.cached_element = ctx.cache(element);
        add_block(group, Block::Paragraph(paragraph));

        process_children(group, element, ctx);
    });

    let after = Paragraph::new(true, context.block_format.clone());
    add_block(group, Block::Paragraph(after));
}

/// `<blockquote>` and `<pre>` keep their own element as a format container.
pub fn format_container_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let tag = node::tag_name(element).unwrap_or_default();
    let defaults = style::default_style(&tag);

    let options = StackFormatOptions {
        paragraph: Some(FormatPolicy::ShallowCloneForGroup),
        segment: Some(FormatPolicy::ShallowCloneForBlock),
        list: Some(FormatPolicy::Empty),
        ..Default::default()
    };
    let container = stack_format(context, options, |ctx| {
        let mut format = FormatMap::new();
        ctx.parsers
            .parse(FormatCategory::Container, &mut format, element, ctx, &defaults);

        let mut segment_format = ctx.segment_format.clone();
        ctx.parsers.parse(
            FormatCategory::SegmentOnBlock,
            &mut segment_format,
            element,
            ctx,
            &defaults,
        );
        ctx.segment_format = segment_format;

        // Only whitespace handling flows into the container's paragraphs; the rest stays on
        // the container element.
        let mut inner = FormatMap::new();
        if let Some(white_space) = format.get("whiteSpace") {
            inner.set("whiteSpace", white_space.clone());
        }
        ctx.block_format = inner;

        let mut container = FormatContainer {
            tag_name: tag.clone(),
            blocks: Vec::new(),
            format,
        };
        process_children(&mut container, element, ctx);
        container
    });

    add_block(group, Block::FormatContainer(container));
}

pub fn divider_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let options = StackFormatOptions {
        paragraph: Some(FormatPolicy::ShallowCloneForGroup),
        ..Default::default()
    };
    let divider = stack_format(context, options, |ctx| {
        let mut format = ctx.block_format.clone();
        ctx.parsers.parse(
            FormatCategory::Divider,
            &mut format,
            element,
            ctx,
            &style::default_style("hr"),
        );
        Divider {
            tag_name: "hr".to_string(),
            format,
            is_selected: ctx.is_in_selection,
            cached_element: ctx.cache(element),
        }
    });

    add_block(group, Block::Divider(divider));
}

#[cfg(test)]
mod tests {
    use crate::dom::MarkupTree;
    use crate::dom_to_model::{dom_to_content_model, DomToModelOptions};
    use crate::model::{Block, ContentModelDocument};

    fn convert(html: &str) -> ContentModelDocument {
        let mut tree = MarkupTree::parse_fragment(html).unwrap();
        let options = DomToModelOptions {
            normalize: false,
            ..DomToModelOptions::default()
        };
        dom_to_content_model(&mut tree, &options, None)
    }

    #[test]
    fn div_opens_explicit_paragraph_then_implicit_one() {
        let model = convert("<div style=\"text-align: center\">a</div>b");
        assert_eq!(model.blocks.len(), 2);
        let first = model.blocks[0].as_paragraph().unwrap();
        assert!(!first.is_implicit);
        assert_eq!(first.format.get_str("textAlign"), Some("center"));
        let second = model.blocks[1].as_paragraph().unwrap();
        assert!(second.is_implicit);
        assert!(!second.format.contains("textAlign"));
        assert_eq!(second.segments.len(), 1);
    }

    #[test]
    fn heading_becomes_decorator() {
        let model = convert("<h1>Title</h1>");
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        let decorator = paragraph.decorator.as_ref().unwrap();
        assert_eq!(decorator.tag_name, "h1");
        assert!(decorator.format.flag("bold"));
        assert_eq!(decorator.format.get_str("fontSize"), Some("2em"));
        assert!(paragraph.segments[0].format().is_empty());
    }

    #[test]
    fn heading_inside_styled_div_drops_overridden_keys() {
        let model = convert("<div style=\"font-weight: normal\"><h2>t</h2></div>");
        let heading = model
            .blocks
            .iter()
            .filter_map(Block::as_paragraph)
            .find(|p| p.decorator.is_some())
            .unwrap();
        assert!(!heading.segments[0].format().contains("bold"));
    }

    #[test]
    fn blockquote_is_a_container() {
        let model = convert("<blockquote style=\"margin-left: 20px\">q</blockquote>");
        match &model.blocks[0] {
            Block::FormatContainer(container) => {
                assert_eq!(container.tag_name, "blockquote");
                assert_eq!(container.format.get_str("marginLeft"), Some("20px"));
                assert_eq!(container.blocks.len(), 1);
            }
            other => panic!("expected a container, got {other:?}"),
        }
    }

    #[test]
    fn pre_keeps_whitespace_inside() {
        let model = convert("<pre>  a\n  b</pre>");
        match &model.blocks[0] {
            Block::FormatContainer(container) => {
                let paragraph = container.blocks[0].as_paragraph().unwrap();
                assert_eq!(paragraph.format.get_str("whiteSpace"), Some("pre"));
            }
            other => panic!("expected a container, got {other:?}"),
        }
    }

    #[test]
    fn hr_is_a_divider() {
        let model = convert("a<hr>b");
        assert!(matches!(model.blocks[1], Block::Divider(_)));
        assert_eq!(model.blocks.len(), 3);
    }
}
