use crate::dom::{node, StyleMap};
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;

/// Anchor attributes and the format keys they map to.
const LINK_ATTRIBUTES: [(&str, &str); 5] = [
    ("href", "href"),
    ("target", "target"),
    ("title", "anchorTitle"),
    ("rel", "relationship"),
    ("name", "name"),
];

pub fn parse_link(format: &mut FormatMap, element: &Handle, _: &DomToModelContext, _: &StyleMap) {
    for (attribute, key) in LINK_ATTRIBUTES {
        if let Some(value) = node::get_attribute(element, attribute) {
            format.set(key, value);
        }
    }
}

pub fn apply_link(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    for (attribute, key) in LINK_ATTRIBUTES {
        if let Some(value) = format.get_str(key) {
            node::set_attribute(element, attribute, value);
        }
    }
}
