use super::reuse_cached_element;
use super::segment::{handle_segment, SegmentCursor};
use crate::dom::{node, tree};
use crate::format::FormatCategory;
use crate::model::{FormatMap, Paragraph, Segment};
use crate::model_to_dom::context::{without_implied, ImplicitFormat, ModelToDomContext};
use crate::model_to_dom::ModelNodeKind;
use markup5ever_rcdom::Handle;

/// Write a paragraph before `ref_node`.
///
/// An implicit paragraph with nothing to carry writes its segments straight into `parent`;
/// everything else gets a container element (the decorator tag, or `div`).
pub fn handle_paragraph(
    parent: &Handle,
    paragraph: &mut Paragraph,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    let tag = paragraph
        .decorator
        .as_ref()
        .map(|d| d.tag_name.to_ascii_lowercase())
        .unwrap_or_else(|| "div".to_string());

    let implied_block = context.implied(&tag, FormatCategory::Block);
    let block_format = without_implied(
        &without_implied(&paragraph.format, &implied_block),
        &context.implicit.block,
    );
    let segment_format = paragraph.segment_format.clone().unwrap_or_default();
    let has_content = paragraph.segments.iter().any(|s| !s.is_marker());

    let needs_container = !paragraph.is_implicit
        || paragraph.decorator.is_some()
        || (has_content && (!block_format.is_empty() || !segment_format.is_empty()));

    if !needs_container {
        let mut cursor = SegmentCursor::new(parent.clone(), ref_node);
        write_segments(&mut cursor, &mut paragraph.segments, context);
        return cursor.ref_node;
    }

    let mut ref_node = ref_node;
    let container = match context.cached(paragraph.cached_element, &tag) {
        Some(element) => {
            for child in tree::children(&element) {
                tree::remove(&child);
            }
            node::remove_attribute(&element, "style");
            ref_node = reuse_cached_element(parent, &element, ref_node);
            element
        }
        None => {
            let element = node::create_element(&tag, vec![]);
            tree::insert_before(parent, &element, ref_node.as_ref());
            element
        }
    };
    context.notify(ModelNodeKind::Paragraph, &container);

    context
        .appliers
        .apply(FormatCategory::Block, &block_format, &container, context);

    let mut implicit_segment = context.implied(&tag, FormatCategory::Segment);
    if let Some(decorator) = &paragraph.decorator {
        let implied = context.implied(&tag, FormatCategory::SegmentOnBlock);
        let decorator_format = without_implied(&decorator.format, &implied);
        context.appliers.apply(
            FormatCategory::SegmentOnBlock,
            &decorator_format,
            &container,
            context,
        );
        implicit_segment.extend_from(&decorator.format);
    }
    if !segment_format.is_empty() {
        context
            .appliers
            .apply(FormatCategory::Segment, &segment_format, &container, context);
        implicit_segment.extend_from(&segment_format);
    }

    let implicit = ImplicitFormat {
        segment: implicit_segment,
        block: FormatMap::new(),
    };
    context.with_implicit(implicit, |ctx| {
        let mut cursor = SegmentCursor::new(container.clone(), None);
        write_segments(&mut cursor, &mut paragraph.segments, ctx);
    });

    paragraph.cached_element = Some(context.nodes.register(&container));
    ref_node
}

fn write_segments(
    cursor: &mut SegmentCursor,
    segments: &mut [Segment],
    context: &mut ModelToDomContext<'_>,
) {
    for segment in segments.iter_mut() {
        handle_segment(cursor, segment, context);
    }
}
