//! Markup tree → content model
//!
//!     The walk starts at the tree root with a fresh [`DomToModelContext`] and dispatches every
//!     node to a processor (see [`processors`]). Processors parse formats through the composed
//!     parser registry, scope ambient formats with [`stack_format`] and append blocks and
//!     segments to the group they were handed.
//!
//!     The result is normalized unless [`DomToModelOptions::normalize`] is turned off.
//!
//! Usage:
//!
//!     let mut tree = MarkupTree::parse_fragment("<p>Hello <b>world</b></p>")?;
//!     let model = dom_to_content_model(&mut tree, &DomToModelOptions::default(), None);

pub mod context;
pub mod helpers;
pub mod measure;
pub mod processors;
pub mod selection;
pub mod stack;

pub use context::{DomToModelContext, ListContext};
pub use measure::{BoxMeasurer, BoxSize, StyleBoxMeasurer};
pub use processors::ElementProcessor;
pub use stack::{stack_format, FormatPolicy, StackFormatOptions};

use crate::dom::{DomSelection, MarkupTree};
use crate::format::{FormatOverrides, FormatParser};
use crate::model::{ContentModelDocument, FormatMap};
use crate::normalize::normalize_content_model;
use std::collections::HashMap;
use std::rc::Rc;

/// Per-call settings of a tree → model conversion.
#[derive(Clone)]
pub struct DomToModelOptions {
    /// Processors replacing (or adding to) the built-in map, keyed by tag name or by one of
    /// the special keys in [`processors`].
    pub processor_overrides: HashMap<String, ElementProcessor>,
    pub parser_overrides: FormatOverrides<FormatParser>,
    /// Segment format every segment starts from.
    pub default_format: FormatMap,
    /// Record back references to the source elements so the writer can reuse them.
    pub allow_cache_element: bool,
    pub measurer: Option<Rc<dyn BoxMeasurer>>,
    pub normalize: bool,
}

impl Default for DomToModelOptions {
    fn default() -> Self {
        Self {
            processor_overrides: HashMap::new(),
            parser_overrides: FormatOverrides::default(),
            default_format: FormatMap::new(),
            allow_cache_element: true,
            measurer: None,
            normalize: true,
        }
    }
}

/// Build a content model from the children of the tree root.
///
/// A selection whose nodes are not attached under the root is ignored.
pub fn dom_to_content_model(
    tree: &mut MarkupTree,
    options: &DomToModelOptions,
    selection: Option<&DomSelection>,
) -> ContentModelDocument {
    let mut context = DomToModelContext::new(options);
    context.nodes = std::mem::take(tree.nodes_mut());

    if let Some(selection) = selection {
        if selection.is_attached_to(tree.root()) {
            context.set_selection(selection);
        } else {
            tracing::debug!("ignoring selection outside the tree root");
        }
    }

    let mut document = ContentModelDocument::new();
    let root = tree.root().clone();
    processors::child_processor(&mut document, &root, &mut context);

    *tree.nodes_mut() = std::mem::take(&mut context.nodes);

    if options.normalize {
        normalize_content_model(&mut document);
    }
    tracing::debug!(blocks = document.blocks.len(), "built content model");
    document
}
