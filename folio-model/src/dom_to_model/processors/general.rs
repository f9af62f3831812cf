//! Fallback for elements no processor claims.
//!
//! The element is kept by handle and its children are still parsed, so unknown wrappers
//! survive a round trip while their content stays editable.

use super::process_children;
use crate::dom::style;
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::helpers::{add_block, add_decorators, add_segment};
use crate::dom_to_model::stack::{stack_format, FormatPolicy, StackFormatOptions};
use crate::model::{Block, BlockGroup, FormatMap, GeneralBlock, GeneralSegment, Segment};
use markup5ever_rcdom::Handle;

pub fn general_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let handle = context.nodes.register(element);
    let options = StackFormatOptions {
        list: Some(FormatPolicy::Empty),
        ..Default::default()
    };

    if style::is_block_element(element) {
        let block = stack_format(context, options, |ctx| {
            let mut block = GeneralBlock {
                element: handle,
                blocks: Vec::new(),
                format: FormatMap::new(),
            };
            process_children(&mut block, element, ctx);
            block
        });
        add_block(group, Block::General(block));
        return;
    }

    let selected_before = context.is_in_selection;
    let mut general = stack_format(context, options, |ctx| {
        let mut general = GeneralSegment {
            element: handle,
            blocks: Vec::new(),
            format: ctx.segment_format.clone(),
            is_selected: false,
            link: None,
            code: None,
        };
        process_children(&mut general, element, ctx);
        general
    });
    general.is_selected = selected_before && context.is_in_selection;

    let mut segment = Segment::General(general);
    add_decorators(&mut segment, context);
    add_segment(group, segment, &context.block_format);
}

#[cfg(test)]
mod tests {
    use crate::dom::{node, MarkupTree};
    use crate::dom_to_model::{dom_to_content_model, DomToModelOptions};
    use crate::model::{Block, Segment};

    #[test]
    fn unknown_inline_element_wraps_its_content() {
        let mut tree = MarkupTree::parse_fragment("x<widget>in</widget>").unwrap();
        let model = dom_to_content_model(&mut tree, &DomToModelOptions::default(), None);
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        match &paragraph.segments[1] {
            Segment::General(general) => {
                let element = tree.nodes().get(general.element).unwrap();
                assert!(node::is_tag(element, "widget"));
                let inner = general.blocks[0].as_paragraph().unwrap();
                assert_eq!(inner.segments[0].as_text().unwrap().text, "in");
            }
            other => panic!("expected a general segment, got {other:?}"),
        }
    }

    #[test]
    fn unknown_block_element_is_a_general_block() {
        let mut tree =
            MarkupTree::parse_fragment("<widget style=\"display: block\">in</widget>").unwrap();
        let model = dom_to_content_model(&mut tree, &DomToModelOptions::default(), None);
        assert!(matches!(model.blocks[0], Block::General(_)));
    }

    #[test]
    fn namespaced_tags_are_transparent() {
        let mut tree = MarkupTree::parse_fragment("a<o:p>b</o:p>").unwrap();
        let options = DomToModelOptions {
            normalize: false,
            ..DomToModelOptions::default()
        };
        let model = dom_to_content_model(&mut tree, &options, None);
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        assert_eq!(paragraph.segments.len(), 1);
        assert_eq!(paragraph.segments[0].as_text().unwrap().text, "ab");
    }
}
