//! Box and alignment handlers shared by blocks, containers, images and dividers.

use super::{
    apply_box, apply_style_from, parse_box, parse_style_into, style_value, SIDES, SIDE_KEYS,
};
use crate::dom::{node, style, StyleMap};
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;

pub fn parse_direction(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    let direction = style_value(element, default_style, "direction")
        .or_else(|| node::get_attribute(element, "dir"));
    if let Some(direction) = direction {
        match direction.to_ascii_lowercase().as_str() {
            "rtl" => format.set("direction", "rtl"),
            "ltr" => format.set("direction", "ltr"),
            _ => {}
        }
    }
}

pub fn apply_direction(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "direction", "direction");
}

pub fn parse_text_align(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    let align = style_value(element, default_style, "text-align")
        .or_else(|| node::get_attribute(element, "align"));
    if let Some(align) = align {
        let align = align.to_ascii_lowercase();
        if matches!(
            align.as_str(),
            "left" | "right" | "center" | "justify" | "start" | "end"
        ) {
            format.set("textAlign", align);
        }
    }
}

pub fn apply_text_align(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "textAlign", "text-align");
}

pub fn parse_margin(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_box(format, element, default_style, "margin");
}

pub fn apply_margin(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_box(format, element, "margin");
}

pub fn parse_padding(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_box(format, element, default_style, "padding");
}

pub fn apply_padding(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_box(format, element, "padding");
}

pub fn parse_border(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    let shorthand = style_value(element, default_style, "border");
    for (i, side) in SIDES.iter().enumerate() {
        let value =
            style_value(element, default_style, &format!("border-{side}")).or(shorthand.clone());
        if let Some(value) = value {
            format.set(&format!("border{}", SIDE_KEYS[i]), value);
        }
    }
    parse_style_into(format, element, default_style, "border-radius", "borderRadius");
}

pub fn apply_border(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    for (i, side) in SIDES.iter().enumerate() {
        if let Some(value) = format.get_str(&format!("border{}", SIDE_KEYS[i])) {
            style::set_style(element, &format!("border-{side}"), value);
        }
    }
    apply_style_from(format, element, "borderRadius", "border-radius");
}

pub fn parse_text_indent(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_style_into(format, element, default_style, "text-indent", "textIndent");
}

pub fn apply_text_indent(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "textIndent", "text-indent");
}

pub fn parse_white_space(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_style_into(format, element, default_style, "white-space", "whiteSpace");
}

pub fn apply_white_space(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "whiteSpace", "white-space");
}

/// `width`/`height` from the style, else from the legacy attributes (bare numbers are pixels).
pub fn parse_size(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    for name in ["width", "height"] {
        let value = style_value(element, default_style, name).or_else(|| {
            node::get_attribute(element, name).map(|v| {
                let v = v.trim().to_string();
                if v.parse::<f64>().is_ok() {
                    format!("{v}px")
                } else {
                    v
                }
            })
        });
        if let Some(value) = value.filter(|v| !v.is_empty() && v != "auto") {
            format.set(name, value);
        }
    }
}

pub fn apply_size(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "width", "width");
    apply_style_from(format, element, "height", "height");
}

pub fn parse_id(format: &mut FormatMap, element: &Handle, _: &DomToModelContext, _: &StyleMap) {
    if let Some(id) = node::get_attribute(element, "id").filter(|id| !id.is_empty()) {
        format.set("id", id);
    }
}

pub fn apply_id(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if let Some(id) = format.get_str("id") {
        node::set_attribute(element, "id", id);
    }
}

pub fn parse_box_shadow(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_style_into(format, element, default_style, "box-shadow", "boxShadow");
}

pub fn apply_box_shadow(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "boxShadow", "box-shadow");
}
