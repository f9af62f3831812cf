//! Node processors and the dispatcher
//!
//!     Every processor has the same shape: it receives the group being filled, the node, and
//!     the context, and appends model nodes to the group. Processors are looked up by key in
//!     the context's processor map, so a caller can replace any of them per conversion.
//!
//!     Elements are classified in this order:
//!         1. entity wrappers (`_Entity` class or `contenteditable="false"`)
//!         2. entity delimiters (`entityDelimiterBefore`/`entityDelimiterAfter`)
//!         3. the processor registered for the tag name
//!         4. namespaced tags (`o:p`, `w:sdt`): transparent, children only
//!         5. general fallback, block or segment by display
//!
//!     Elements with an inline `display: none` are skipped entirely.

mod block;
mod entity;
mod general;
mod image;
mod inline;
mod list;
mod table;
mod text;

pub use list::{LIST_METADATA_KEY, START_NUMBER_OVERRIDE};

use super::context::DomToModelContext;
use super::selection::handle_regular_selection;
use crate::dom::{node, style, tree, NodeKind};
use crate::format::handlers::ENTITY_CLASS;
use crate::model::BlockGroup;
use markup5ever_rcdom::Handle;
use std::collections::HashMap;

/// Converts one node into model content appended to `group`.
pub type ElementProcessor = fn(&mut dyn BlockGroup, &Handle, &mut DomToModelContext);

pub const TEXT_PROCESSOR: &str = "#text";
pub const ENTITY_PROCESSOR: &str = "#entity";
pub const DELIMITER_PROCESSOR: &str = "#delimiter";
pub const GENERAL_PROCESSOR: &str = "*";
pub const CHILD_PROCESSOR: &str = "#child";

pub const DELIMITER_BEFORE_CLASS: &str = "entityDelimiterBefore";
pub const DELIMITER_AFTER_CLASS: &str = "entityDelimiterAfter";

const FORMAT_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "s", "strike", "del", "ins", "sub", "sup", "span", "small",
    "big", "mark", "label", "abbr", "cite", "dfn", "var", "kbd", "samp", "tt", "font",
];

const BLOCK_TAGS: &[&str] = &[
    "div", "center", "section", "article", "aside", "header", "footer", "main", "nav",
    "address", "figure", "figcaption", "form", "fieldset", "details", "summary", "dd", "dt",
    "dl",
];

/// The built-in processor map.
pub fn default_processors() -> HashMap<String, ElementProcessor> {
    let mut map: HashMap<String, ElementProcessor> = HashMap::new();
    for tag in FORMAT_TAGS {
        map.insert(tag.to_string(), inline::format_processor);
    }
    for tag in BLOCK_TAGS {
        map.insert(tag.to_string(), block::block_processor);
    }
    for tag in ["p", "h1", "h2", "h3", "h4", "h5", "h6"] {
        map.insert(tag.to_string(), block::decorated_block_processor);
    }
    for tag in ["blockquote", "pre"] {
        map.insert(tag.to_string(), block::format_container_processor);
    }
    for tag in ["ol", "ul"] {
        map.insert(tag.to_string(), list::list_processor);
    }
    map.insert("li".to_string(), list::list_item_processor);
    map.insert("br".to_string(), inline::br_processor);
    map.insert("a".to_string(), inline::link_processor);
    map.insert("code".to_string(), inline::code_processor);
    map.insert("img".to_string(), image::image_processor);
    map.insert("hr".to_string(), block::divider_processor);
    map.insert("table".to_string(), table::table_processor);
    map.insert(TEXT_PROCESSOR.to_string(), text::text_processor);
    map.insert(ENTITY_PROCESSOR.to_string(), entity::entity_processor);
    map.insert(DELIMITER_PROCESSOR.to_string(), entity::delimiter_processor);
    map.insert(GENERAL_PROCESSOR.to_string(), general::general_processor);
    map.insert(CHILD_PROCESSOR.to_string(), child_processor);
    map
}

pub fn is_entity(element: &Handle) -> bool {
    node::has_class(element, ENTITY_CLASS)
        || node::get_attribute(element, "contenteditable").as_deref() == Some("false")
}

pub fn is_delimiter(element: &Handle) -> bool {
    node::has_class(element, DELIMITER_BEFORE_CLASS)
        || node::has_class(element, DELIMITER_AFTER_CLASS)
}

fn run(key: &str, group: &mut dyn BlockGroup, node: &Handle, context: &mut DomToModelContext) {
    if let Some(processor) = context.processor(key) {
        processor(group, node, context);
    }
}

/// Classify an element and hand it to its processor.
pub fn element_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    if style::is_display_none(element) {
        return;
    }
    let tag = node::tag_name(element).unwrap_or_default();

    let key = if is_entity(element) {
        ENTITY_PROCESSOR.to_string()
    } else if is_delimiter(element) {
        DELIMITER_PROCESSOR.to_string()
    } else if context.processors.contains_key(&tag) {
        tag.clone()
    } else if tag.contains(':') {
        CHILD_PROCESSOR.to_string()
    } else {
        GENERAL_PROCESSOR.to_string()
    };

    tracing::trace!(tag = %tag, processor = %key, "dispatching element");
    run(&key, group, element, context);
}

/// Process any node: elements are dispatched, text goes to the text processor, other node
/// kinds (comments, doctypes) are ignored.
pub fn process_node(
    group: &mut dyn BlockGroup,
    node: &Handle,
    context: &mut DomToModelContext,
) {
    match node::kind(node) {
        NodeKind::Element => element_processor(group, node, context),
        NodeKind::Text => run(TEXT_PROCESSOR, group, node, context),
        NodeKind::Fragment => child_processor(group, node, context),
        NodeKind::Other => {}
    }
}

/// Process the children of `parent` in order, checking range endpoints that sit between them.
pub fn child_processor(
    group: &mut dyn BlockGroup,
    parent: &Handle,
    context: &mut DomToModelContext,
) {
    let children = tree::children(parent);
    for (index, child) in children.iter().enumerate() {
        handle_regular_selection(index, parent, group, context);
        process_node(group, child, context);
    }
    handle_regular_selection(children.len(), parent, group, context);
}

/// Run the (possibly overridden) child processor.
pub(crate) fn process_children(
    group: &mut dyn BlockGroup,
    parent: &Handle,
    context: &mut DomToModelContext,
) {
    match context.processor(CHILD_PROCESSOR) {
        Some(processor) => processor(group, parent, context),
        None => child_processor(group, parent, context),
    }
}
