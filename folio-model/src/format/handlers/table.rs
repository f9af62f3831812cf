use super::style_value;
use crate::dom::{node, style, StyleMap};
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;

pub fn parse_border_box(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    if style_value(element, default_style, "box-sizing").as_deref() == Some("border-box") {
        format.set("useBorderBox", true);
    }
}

pub fn apply_border_box(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if format.flag("useBorderBox") {
        style::set_style(element, "box-sizing", "border-box");
    }
}

pub fn parse_table_spacing(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    let collapsed = style_value(element, default_style, "border-collapse").as_deref()
        == Some("collapse")
        || node::get_attribute(element, "cellspacing").as_deref() == Some("0");
    if collapsed {
        format.set("borderCollapse", true);
    }
}

pub fn apply_table_spacing(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if format.flag("borderCollapse") {
        style::set_style(element, "border-collapse", "collapse");
    }
}

pub fn parse_vertical_align(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    let align = style_value(element, default_style, "vertical-align")
        .or_else(|| node::get_attribute(element, "valign"));
    match align.map(|a| a.to_ascii_lowercase()).as_deref() {
        Some("top") => format.set("verticalAlign", "top"),
        Some("middle") | Some("center") => format.set("verticalAlign", "middle"),
        Some("bottom") => format.set("verticalAlign", "bottom"),
        _ => {}
    }
}

pub fn apply_vertical_align(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if let Some(align) = format.get_str("verticalAlign") {
        style::set_style(element, "vertical-align", align);
    }
}
