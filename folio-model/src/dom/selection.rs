//! Selection shapes exchanged with the host.
//!
//! The same types describe the live selection handed to the tree → model conversion and the
//! selection resolved by the model → tree writer.

use super::{node, tree};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

/// A position in the tree: a container plus a child index (elements) or character offset
/// (text nodes).
#[derive(Debug, Clone)]
pub struct DomPoint {
    pub node: Handle,
    pub offset: usize,
}

impl DomPoint {
    pub fn new(node: Handle, offset: usize) -> Self {
        Self { node, offset }
    }

    pub fn is_text(&self) -> bool {
        node::is_text(&self.node)
    }
}

impl PartialEq for DomPoint {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node) && self.offset == other.offset
    }
}

/// A linear caret or range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelection {
    pub start: DomPoint,
    pub end: DomPoint,
    pub is_collapsed: bool,
}

impl RangeSelection {
    pub fn new(start: DomPoint, end: DomPoint) -> Self {
        let is_collapsed = start == end;
        Self {
            start,
            end,
            is_collapsed,
        }
    }

    pub fn caret(point: DomPoint) -> Self {
        Self::new(point.clone(), point)
    }
}

/// A rectangular block of table cells.
#[derive(Debug, Clone)]
pub struct TableSelection {
    pub table: Handle,
    pub first_column: usize,
    pub first_row: usize,
    pub last_column: usize,
    pub last_row: usize,
}

impl TableSelection {
    /// Whether a grid coordinate lies inside the region, whichever corner is the anchor.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        let (top, bottom) = ordered(self.first_row, self.last_row);
        let (left, right) = ordered(self.first_column, self.last_column);
        (top..=bottom).contains(&row) && (left..=right).contains(&column)
    }
}

impl PartialEq for TableSelection {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
            && self.first_column == other.first_column
            && self.first_row == other.first_row
            && self.last_column == other.last_column
            && self.last_row == other.last_row
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A single selected image.
#[derive(Debug, Clone)]
pub struct ImageSelection {
    pub image: Handle,
}

impl PartialEq for ImageSelection {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.image, &other.image)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomSelection {
    Range(RangeSelection),
    Table(TableSelection),
    Image(ImageSelection),
}

impl DomSelection {
    /// Whether every node the selection references is still attached under `root`.
    pub fn is_attached_to(&self, root: &Handle) -> bool {
        match self {
            DomSelection::Range(range) => {
                tree::contains(root, &range.start.node) && tree::contains(root, &range.end.node)
            }
            DomSelection::Table(table) => tree::contains(root, &table.table),
            DomSelection::Image(image) => tree::contains(root, &image.image),
        }
    }
}
