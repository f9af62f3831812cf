//! Format parsers and appliers
//!
//!     A format handler reads one facet of an element's styling into a [`FormatMap`] (parse)
//!     and writes it back onto an element (apply). Handlers are grouped into categories, one
//!     per kind of model node, and each category runs its handlers in a fixed order: later
//!     handlers may overwrite keys set by earlier ones.
//!
//!     Parsers receive the tag's default style next to the element. An explicit inline value
//!     always wins; the default is only consulted when the element has no value of its own.
//!     Parsers never fail: absent or unrecognized values are skipped.
//!
//!     Callers customise a conversion through [`FormatOverrides`]: an override replaces the
//!     built-in handler of the same key in place (or drops it), and additional handlers run
//!     after every built-in of their category. See [`registry`].

pub mod handlers;
pub mod registry;

use crate::dom::StyleMap;
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

pub use registry::{ComposedFormats, FormatAppliers, FormatEntry, FormatOverrides, FormatParsers};

/// Reads styling of an element into a format.
pub type FormatParser = fn(&mut FormatMap, &Handle, &DomToModelContext, &StyleMap);

/// Writes a format onto an element.
pub type FormatApplier = fn(&FormatMap, &Handle, &ModelToDomContext<'_>);

/// A parser/applier pair for one format key.
#[derive(Clone, Copy)]
pub struct FormatHandler {
    pub key: &'static str,
    pub parse: FormatParser,
    pub apply: FormatApplier,
}

/// The kind of model node a group of handlers serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatCategory {
    Block,
    Container,
    Segment,
    SegmentOnBlock,
    SegmentOnTableCell,
    Link,
    Code,
    Table,
    TableCell,
    TableRow,
    ListItemElement,
    ListLevel,
    ListLevelThread,
    Image,
    Divider,
    Entity,
    General,
    Dataset,
}

impl FormatCategory {
    pub const ALL: [FormatCategory; 18] = [
        FormatCategory::Block,
        FormatCategory::Container,
        FormatCategory::Segment,
        FormatCategory::SegmentOnBlock,
        FormatCategory::SegmentOnTableCell,
        FormatCategory::Link,
        FormatCategory::Code,
        FormatCategory::Table,
        FormatCategory::TableCell,
        FormatCategory::TableRow,
        FormatCategory::ListItemElement,
        FormatCategory::ListLevel,
        FormatCategory::ListLevelThread,
        FormatCategory::Image,
        FormatCategory::Divider,
        FormatCategory::Entity,
        FormatCategory::General,
        FormatCategory::Dataset,
    ];

    /// Built-in handler keys of this category, in execution order.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            FormatCategory::Block => &[
                "direction",
                "textAlign",
                "backgroundColor",
                "lineHeight",
                "margin",
                "padding",
                "border",
                "textIndent",
                "whiteSpace",
            ],
            FormatCategory::Container => &[
                "direction",
                "textAlign",
                "backgroundColor",
                "margin",
                "padding",
                "border",
                "whiteSpace",
            ],
            FormatCategory::Segment => &[
                "superOrSubScript",
                "strikethrough",
                "fontFamily",
                "fontSize",
                "underline",
                "textColor",
                "backgroundColor",
                "bold",
                "italic",
                "letterSpacing",
                "lineHeight",
            ],
            FormatCategory::SegmentOnBlock => &[
                "fontFamily",
                "fontSize",
                "underline",
                "italic",
                "bold",
                "textColor",
            ],
            FormatCategory::SegmentOnTableCell => &[
                "fontFamily",
                "fontSize",
                "underline",
                "italic",
                "bold",
                "textColor",
            ],
            FormatCategory::Link => &[
                "link",
                "textColor",
                "underline",
                "backgroundColor",
                "margin",
                "padding",
            ],
            FormatCategory::Code => &["fontFamily"],
            FormatCategory::Table => &[
                "id",
                "border",
                "borderBox",
                "tableSpacing",
                "margin",
                "backgroundColor",
                "size",
            ],
            FormatCategory::TableCell => &[
                "border",
                "backgroundColor",
                "padding",
                "direction",
                "textAlign",
                "verticalAlign",
                "whiteSpace",
            ],
            FormatCategory::TableRow => &["backgroundColor"],
            FormatCategory::ListItemElement => &[
                "direction",
                "lineHeight",
                "margin",
                "padding",
                "textAlign",
                "listStyle",
            ],
            FormatCategory::ListLevel => &[
                "direction",
                "textAlign",
                "margin",
                "padding",
                "listStyle",
                "backgroundColor",
            ],
            FormatCategory::ListLevelThread => &["listLevelThread"],
            FormatCategory::Image => &["id", "size", "margin", "padding", "border", "boxShadow"],
            FormatCategory::Divider => &["margin", "padding", "border", "size"],
            FormatCategory::Entity => &["entity"],
            FormatCategory::General => &[],
            FormatCategory::Dataset => &["dataset"],
        }
    }
}

/// Look up the built-in handler of a key.
pub fn handler(key: &str) -> Option<&'static FormatHandler> {
    handlers::HANDLERS.iter().find(|h| h.key == key)
}
