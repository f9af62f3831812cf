use super::{apply_style_from, parse_style_into};
use crate::dom::{node, StyleMap};
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;

pub fn parse_list_style(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_style_into(format, element, default_style, "list-style-type", "listStyleType");
    parse_style_into(
        format,
        element,
        default_style,
        "list-style-position",
        "listStylePosition",
    );
}

pub fn apply_list_style(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "listStyleType", "list-style-type");
    apply_style_from(format, element, "listStylePosition", "list-style-position");
}

/// Reads the `start` attribute of an ordered list. Whether it actually restarts numbering is
/// decided by the list processor against the running thread counters.
pub fn parse_thread(format: &mut FormatMap, element: &Handle, _: &DomToModelContext, _: &StyleMap) {
    if !node::is_tag(element, "ol") {
        return;
    }
    if let Some(start) = node::get_attribute(element, "start") {
        match start.trim().parse::<u32>() {
            Ok(n) if n >= 1 => format.set("startNumberOverride", f64::from(n)),
            _ => tracing::debug!(start = %start, "ignoring invalid list start attribute"),
        }
    }
}

pub fn apply_thread(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if let Some(start) = format.get_number("startNumberOverride") {
        if node::is_tag(element, "ol") && start != 1.0 {
            node::set_attribute(element, "start", &(start as u32).to_string());
        }
    }
}
