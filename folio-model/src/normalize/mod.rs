//! Model normalization
//!
//!     A cleanup pass run once after a tree → model conversion so that converting the same
//!     tree again yields the same model. Every paragraph goes through [`normalize_paragraph`];
//!     groups are walked depth first (table cells, list items, containers, general blocks and
//!     the blocks inside general segments included) and blocks left empty are pruned.
//!
//!     The pass is idempotent.

mod paragraph;
mod whitespace;

pub use paragraph::normalize_paragraph;
pub use whitespace::{collapse_whitespace, preserves_whitespace, NBSP};

use crate::model::{Block, BlockGroup, ListItem, Segment};

/// Normalize every block of `group`, recursively.
pub fn normalize_content_model(group: &mut dyn BlockGroup) {
    let blocks = group.blocks_mut();
    for block in blocks.iter_mut() {
        normalize_block(block);
    }
    blocks.retain(|block| !is_empty_block(block));
}

fn normalize_block(block: &mut Block) {
    match block {
        Block::Paragraph(paragraph) => {
            for segment in paragraph.segments.iter_mut() {
                if let Segment::General(general) = segment {
                    normalize_content_model(general);
                }
            }
            normalize_paragraph(paragraph);
        }
        Block::Table(table) => {
            for cell in table.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
                normalize_content_model(cell);
            }
        }
        Block::ListItem(item) => {
            normalize_content_model(item);
            normalize_format_holder(item);
        }
        Block::FormatContainer(container) => normalize_content_model(container),
        Block::General(general) => normalize_content_model(general),
        Block::Divider(_) | Block::Entity(_) => {}
    }
}

fn is_empty_block(block: &Block) -> bool {
    match block {
        Block::Paragraph(paragraph) => paragraph.segments.is_empty(),
        Block::FormatContainer(container) => container.blocks.is_empty(),
        Block::Table(table) => table.rows.is_empty(),
        _ => false,
    }
}

/// The list marker counts as selected when everything written in the item is.
fn normalize_format_holder(item: &mut ListItem) {
    let mut segments = item
        .blocks
        .iter()
        .filter_map(Block::as_paragraph)
        .flat_map(|paragraph| paragraph.segments.iter())
        .peekable();
    let has_segments = segments.peek().is_some();
    item.format_holder.is_selected = has_segments && segments.all(Segment::is_selected);
}
