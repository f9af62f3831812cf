//! The content model
//!
//! A content model is a tree of three families of nodes:
//!
//!     - blocks, stacked vertically: [`Paragraph`], [`Table`], [`Divider`], [`Entity`] and the
//!       block groups
//!     - block groups, blocks that hold blocks: [`ContentModelDocument`], [`FormatContainer`],
//!       [`ListItem`], [`TableCell`], [`GeneralBlock`] (and [`GeneralSegment`], an inline group)
//!     - segments, inline content of a paragraph: text, line breaks, images, selection markers,
//!       entities and general segments
//!
//! The model holds no parent pointers and no tree nodes. Back references into the markup tree
//! (`cached_element`, `element`, `wrapper`) are [`NodeId`] handles into the tree's node store.

mod block_group;
mod format;

pub use block_group::{BlockGroup, BlockGroupType};
pub use format::{FormatMap, FormatValue};

use crate::dom::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentModelDocument {
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
}

impl ContentModelDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockType")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Divider(Divider),
    Entity(Entity),
    FormatContainer(FormatContainer),
    ListItem(ListItem),
    General(GeneralBlock),
}

impl Block {
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_list_item(&self) -> Option<&ListItem> {
        match self {
            Block::ListItem(li) => Some(li),
            _ => None,
        }
    }

    /// Child blocks when this block is also a block group.
    pub fn as_group_mut(&mut self) -> Option<&mut dyn BlockGroup> {
        match self {
            Block::FormatContainer(g) => Some(g),
            Block::ListItem(g) => Some(g),
            Block::General(g) => Some(g),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    /// Format shared by all segments, written on the paragraph element itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_format: Option<FormatMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorator: Option<ParagraphDecorator>,
    /// The paragraph has no container element of its own in the tree.
    #[serde(default)]
    pub is_implicit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_element: Option<NodeId>,
}

impl Paragraph {
    pub fn new(is_implicit: bool, format: FormatMap) -> Self {
        Self {
            is_implicit,
            format,
            ..Self::default()
        }
    }

    pub fn with_decorator(mut self, decorator: Option<ParagraphDecorator>) -> Self {
        self.decorator = decorator;
        self
    }
}

/// Tag plus format written around a paragraph, used for headings and `<p>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphDecorator {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub dataset: FormatMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub format: FormatMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Br {
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

/// Zero-width caret placeholder. Markers are always selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionMarker {
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

impl Default for SelectionMarker {
    fn default() -> Self {
        Self {
            format: FormatMap::new(),
            is_selected: true,
            link: None,
            code: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub dataset: FormatMap,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected_as_image_selection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

/// Identity of a host-managed entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub is_readonly: bool,
}

/// An opaque host-managed subtree, either a block or a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub wrapper: NodeId,
    pub entity_format: EntityInfo,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

/// Opaque inline wrapper around an unrecognized element; its content is parsed as blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSegment {
    pub element: NodeId,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "segmentType")]
pub enum Segment {
    Text(Text),
    Br(Br),
    Image(Image),
    SelectionMarker(SelectionMarker),
    Entity(Entity),
    General(GeneralSegment),
}

macro_rules! each_segment {
    ($segment:expr, $s:ident => $body:expr) => {
        match $segment {
            Segment::Text($s) => $body,
            Segment::Br($s) => $body,
            Segment::Image($s) => $body,
            Segment::SelectionMarker($s) => $body,
            Segment::Entity($s) => $body,
            Segment::General($s) => $body,
        }
    };
}

impl Segment {
    pub fn text(text: &str, format: FormatMap) -> Self {
        Segment::Text(Text {
            text: text.to_string(),
            format,
            ..Text::default()
        })
    }

    pub fn br(format: FormatMap) -> Self {
        Segment::Br(Br {
            format,
            ..Br::default()
        })
    }

    pub fn marker(format: FormatMap) -> Self {
        Segment::SelectionMarker(SelectionMarker {
            format,
            ..SelectionMarker::default()
        })
    }

    pub fn format(&self) -> &FormatMap {
        each_segment!(self, s => &s.format)
    }

    pub fn format_mut(&mut self) -> &mut FormatMap {
        each_segment!(self, s => &mut s.format)
    }

    pub fn is_selected(&self) -> bool {
        each_segment!(self, s => s.is_selected)
    }

    pub fn set_selected(&mut self, selected: bool) {
        each_segment!(self, s => s.is_selected = selected)
    }

    pub fn link(&self) -> Option<&Link> {
        each_segment!(self, s => s.link.as_ref())
    }

    pub fn link_mut(&mut self) -> &mut Option<Link> {
        each_segment!(self, s => &mut s.link)
    }

    pub fn code(&self) -> Option<&Code> {
        each_segment!(self, s => s.code.as_ref())
    }

    pub fn code_mut(&mut self) -> &mut Option<Code> {
        each_segment!(self, s => &mut s.code)
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Segment::SelectionMarker(_))
    }

    pub fn is_br(&self) -> bool {
        matches!(self, Segment::Br(_))
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Segment::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Segment::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
    /// Column widths in pixels, one per grid column.
    #[serde(default)]
    pub widths: Vec<f64>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub dataset: FormatMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_element: Option<NodeId>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub height: f64,
    pub cells: Vec<TableCell>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_element: Option<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub dataset: FormatMap,
    /// This cell is covered by the cell to its left.
    #[serde(default, skip_serializing_if = "is_false")]
    pub span_left: bool,
    /// This cell is covered by the cell above it.
    #[serde(default, skip_serializing_if = "is_false")]
    pub span_above: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_header: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_element: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_element: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatContainer {
    pub tag_name: String,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListType {
    #[serde(rename = "OL")]
    Ordered,
    #[serde(rename = "UL")]
    Unordered,
}

impl ListType {
    pub fn tag_name(&self) -> &'static str {
        match self {
            ListType::Ordered => "ol",
            ListType::Unordered => "ul",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ol" => Some(ListType::Ordered),
            "ul" => Some(ListType::Unordered),
            _ => None,
        }
    }
}

/// One list nesting depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListLevel {
    pub list_type: ListType,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub dataset: FormatMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub blocks: Vec<Block>,
    /// Outermost level first.
    pub levels: Vec<ListLevel>,
    /// Carries the segment format of the list marker.
    pub format_holder: SelectionMarker,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
}

impl ListItem {
    pub fn new(levels: Vec<ListLevel>, segment_format: FormatMap) -> Self {
        Self {
            blocks: Vec::new(),
            levels,
            format_holder: SelectionMarker {
                format: segment_format,
                is_selected: false,
                link: None,
                code: None,
            },
            format: FormatMap::new(),
        }
    }
}

/// Opaque block wrapper around an unrecognized element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralBlock {
    pub element: NodeId,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "FormatMap::is_empty")]
    pub format: FormatMap,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_accessors_cover_every_kind() {
        let mut segments = vec![
            Segment::text("a", FormatMap::new()),
            Segment::br(FormatMap::new()),
            Segment::marker(FormatMap::new()),
        ];
        assert!(!segments[0].is_selected());
        assert!(segments[2].is_selected());
        for segment in segments.iter_mut() {
            segment.format_mut().set("bold", true);
            *segment.link_mut() = Some(Link::default());
        }
        assert!(segments.iter().all(|s| s.format().flag("bold")));
        assert!(segments.iter().all(|s| s.link().is_some()));
    }

    #[test]
    fn blocks_serialize_with_type_tags() {
        let mut paragraph = Paragraph::new(true, FormatMap::new());
        paragraph.segments.push(Segment::text("hi", FormatMap::new()));
        let json = serde_json::to_value(Block::Paragraph(paragraph)).unwrap();
        assert_eq!(json["blockType"], "Paragraph");
        assert_eq!(json["segments"][0]["segmentType"], "Text");
        assert_eq!(json["segments"][0]["text"], "hi");
        assert_eq!(json["is_implicit"], true);
    }

    #[test]
    fn list_type_maps_tags() {
        assert_eq!(ListType::from_tag("ol"), Some(ListType::Ordered));
        assert_eq!(ListType::Unordered.tag_name(), "ul");
        assert_eq!(ListType::from_tag("li"), None);
    }
}
