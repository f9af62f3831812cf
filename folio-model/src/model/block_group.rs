//! Shared view over every node that holds child blocks.

use super::{
    Block, ContentModelDocument, FormatContainer, FormatMap, GeneralBlock, GeneralSegment,
    ListItem, TableCell,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockGroupType {
    Document,
    FormatContainer,
    ListItem,
    TableCell,
    General,
}

/// A model node that contains blocks.
pub trait BlockGroup {
    fn group_type(&self) -> BlockGroupType;
    fn blocks(&self) -> &[Block];
    fn blocks_mut(&mut self) -> &mut Vec<Block>;
    fn group_format(&self) -> &FormatMap;
}

macro_rules! impl_block_group {
    ($ty:ty, $group:expr) => {
        impl BlockGroup for $ty {
            fn group_type(&self) -> BlockGroupType {
                $group
            }

            fn blocks(&self) -> &[Block] {
                &self.blocks
            }

            fn blocks_mut(&mut self) -> &mut Vec<Block> {
                &mut self.blocks
            }

            fn group_format(&self) -> &FormatMap {
                &self.format
            }
        }
    };
}

impl_block_group!(ContentModelDocument, BlockGroupType::Document);
impl_block_group!(FormatContainer, BlockGroupType::FormatContainer);
impl_block_group!(ListItem, BlockGroupType::ListItem);
impl_block_group!(TableCell, BlockGroupType::TableCell);
impl_block_group!(GeneralBlock, BlockGroupType::General);
impl_block_group!(GeneralSegment, BlockGroupType::General);
