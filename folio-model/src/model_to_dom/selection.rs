//! Selection recorded while writing and resolved once the tree is final.
//!
//! Positions are recorded relative to nodes rather than as indices, since later blocks may
//! still insert or remove siblings. They are turned into (container, offset) points only after
//! the whole model has been written.

use crate::dom::{
    node, tree, DomPoint, DomSelection, ImageSelection, NodeKind, RangeSelection, TableSelection,
};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

/// A caret position captured during the write.
#[derive(Debug, Clone)]
pub enum RecordedPosition {
    /// Character offset inside a text node.
    Text { node: Handle, offset: usize },
    /// Right after a node, in its parent.
    After(Handle),
    /// At the very start of a container.
    Start(Handle),
}

impl RecordedPosition {
    pub fn resolve(&self) -> Option<DomPoint> {
        match self {
            RecordedPosition::Text { node, offset } => Some(DomPoint::new(node.clone(), *offset)),
            RecordedPosition::After(node) => {
                let parent = tree::parent(node)?;
                let index = tree::index_in_parent(node)?;
                Some(DomPoint::new(parent, index + 1))
            }
            RecordedPosition::Start(container) => {
                if node::kind(container) == NodeKind::Fragment {
                    tree::first_child(container).map(|first| DomPoint::new(first, 0))
                } else {
                    Some(DomPoint::new(container.clone(), 0))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionRecorder {
    pub start: Option<RecordedPosition>,
    pub end: Option<RecordedPosition>,
    pub table: Option<TableSelection>,
    pub image: Option<Handle>,
}

impl SelectionRecorder {
    /// Note a selected run beginning at `position`; only the first one counts.
    pub fn open(&mut self, position: RecordedPosition) {
        if self.start.is_none() {
            self.start = Some(position);
        }
    }

    /// Note a selected run ending at `position`; the last one wins.
    pub fn close(&mut self, position: RecordedPosition) {
        self.end = Some(position);
    }

    /// Grow the table selection of `table` to cover a selected cell.
    pub fn add_cell(&mut self, table: &Handle, row: usize, column: usize) {
        match &mut self.table {
            Some(selection) if Rc::ptr_eq(&selection.table, table) => {
                selection.first_row = selection.first_row.min(row);
                selection.last_row = selection.last_row.max(row);
                selection.first_column = selection.first_column.min(column);
                selection.last_column = selection.last_column.max(column);
            }
            Some(_) => {}
            None => {
                self.table = Some(TableSelection {
                    table: table.clone(),
                    first_column: column,
                    first_row: row,
                    last_column: column,
                    last_row: row,
                })
            }
        }
    }

    /// Table selections win over image selections, which win over ranges.
    pub fn resolve(&self) -> Option<DomSelection> {
        if let Some(table) = &self.table {
            return Some(DomSelection::Table(table.clone()));
        }
        if let Some(image) = &self.image {
            return Some(DomSelection::Image(ImageSelection {
                image: image.clone(),
            }));
        }

        let start = self.start.as_ref()?.resolve()?;
        let end = match &self.end {
            Some(end) => end.resolve().unwrap_or_else(|| start.clone()),
            None => start.clone(),
        };
        Some(DomSelection::Range(RangeSelection::new(start, end)))
    }
}
