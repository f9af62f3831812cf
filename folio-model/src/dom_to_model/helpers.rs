//! Building blocks and segments into the current group.

use super::context::DomToModelContext;
use crate::model::{Block, BlockGroup, FormatMap, Paragraph, Segment};

/// The last block of the group when it is a paragraph, else a new implicit paragraph.
pub fn ensure_paragraph<'a>(
    group: &'a mut dyn BlockGroup,
    block_format: &FormatMap,
) -> &'a mut Paragraph {
    let blocks = group.blocks_mut();
    if !matches!(blocks.last(), Some(Block::Paragraph(_))) {
        blocks.push(Block::Paragraph(Paragraph::new(true, block_format.clone())));
    }
    match blocks.last_mut() {
        Some(Block::Paragraph(paragraph)) => paragraph,
        _ => unreachable!("last block was just ensured to be a paragraph"),
    }
}

/// Append a segment to the group's current paragraph.
///
/// A selection marker is dropped when the previous segment is already selected; a selected
/// segment replaces a selected marker right before it. Together these keep at most one marker
/// per contiguous selected run.
pub fn add_segment<'a>(
    group: &'a mut dyn BlockGroup,
    segment: Segment,
    block_format: &FormatMap,
) -> &'a mut Paragraph {
    let paragraph = ensure_paragraph(group, block_format);
    let last_selected_marker = paragraph
        .segments
        .last()
        .map(|last| (last.is_selected(), last.is_marker()));

    if segment.is_marker() {
        let last_selected = last_selected_marker.is_some_and(|(selected, _)| selected);
        if !last_selected || !segment.is_selected() {
            paragraph.segments.push(segment);
        }
    } else {
        if segment.is_selected() && last_selected_marker == Some((true, true)) {
            paragraph.segments.pop();
        }
        paragraph.segments.push(segment);
    }
    paragraph
}

pub fn add_block(group: &mut dyn BlockGroup, block: Block) {
    group.blocks_mut().push(block);
}

/// Attach the ambient link and code decorators to a segment.
pub fn add_decorators(segment: &mut Segment, context: &DomToModelContext) {
    if context.link.format.contains("href") {
        *segment.link_mut() = Some(context.link.clone());
    }
    if !context.code.format.is_empty() {
        *segment.code_mut() = Some(context.code.clone());
    }
}

/// Add a caret marker carrying the ambient segment format.
pub fn add_selection_marker(group: &mut dyn BlockGroup, context: &DomToModelContext) {
    let mut marker = Segment::marker(context.segment_format.clone());
    add_decorators(&mut marker, context);
    add_segment(group, marker, &context.block_format);
}
