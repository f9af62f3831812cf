//! Built-in format handlers.

mod block;
mod dataset;
mod entity;
mod link;
mod list;
mod table;
mod text;

pub use dataset::{read_dataset, write_dataset};
pub use entity::{entity_classes, ENTITY_CLASS};

use super::FormatHandler;
use crate::dom::{style, StyleMap};
use crate::model::FormatMap;
use markup5ever_rcdom::Handle;

macro_rules! handler {
    ($key:literal, $module:ident :: $parse:ident, $apply:ident) => {
        FormatHandler {
            key: $key,
            parse: $module::$parse,
            apply: $module::$apply,
        }
    };
}

/// Every built-in handler, one per key.
pub static HANDLERS: &[FormatHandler] = &[
    handler!("bold", text::parse_bold, apply_bold),
    handler!("italic", text::parse_italic, apply_italic),
    handler!("underline", text::parse_underline, apply_underline),
    handler!("strikethrough", text::parse_strikethrough, apply_strikethrough),
    handler!("superOrSubScript", text::parse_super_or_sub, apply_super_or_sub),
    handler!("fontFamily", text::parse_font_family, apply_font_family),
    handler!("fontSize", text::parse_font_size, apply_font_size),
    handler!("textColor", text::parse_text_color, apply_text_color),
    handler!("backgroundColor", text::parse_background_color, apply_background_color),
    handler!("letterSpacing", text::parse_letter_spacing, apply_letter_spacing),
    handler!("lineHeight", text::parse_line_height, apply_line_height),
    handler!("direction", block::parse_direction, apply_direction),
    handler!("textAlign", block::parse_text_align, apply_text_align),
    handler!("margin", block::parse_margin, apply_margin),
    handler!("padding", block::parse_padding, apply_padding),
    handler!("border", block::parse_border, apply_border),
    handler!("textIndent", block::parse_text_indent, apply_text_indent),
    handler!("whiteSpace", block::parse_white_space, apply_white_space),
    handler!("size", block::parse_size, apply_size),
    handler!("id", block::parse_id, apply_id),
    handler!("boxShadow", block::parse_box_shadow, apply_box_shadow),
    handler!("borderBox", table::parse_border_box, apply_border_box),
    handler!("tableSpacing", table::parse_table_spacing, apply_table_spacing),
    handler!("verticalAlign", table::parse_vertical_align, apply_vertical_align),
    handler!("listStyle", list::parse_list_style, apply_list_style),
    handler!("listLevelThread", list::parse_thread, apply_thread),
    handler!("link", link::parse_link, apply_link),
    handler!("entity", entity::parse_entity, apply_entity),
    handler!("dataset", dataset::parse_dataset, apply_dataset),
];

/// Explicit inline value, else the tag default. `inherit` reads as absent.
pub(crate) fn style_value(
    element: &Handle,
    default_style: &StyleMap,
    css: &str,
) -> Option<String> {
    style::style_or_default(element, default_style, css).filter(|v| v != "inherit")
}

fn parse_style_into(
    format: &mut FormatMap,
    element: &Handle,
    default_style: &StyleMap,
    css: &str,
    key: &str,
) {
    if let Some(value) = style_value(element, default_style, css) {
        format.set(key, value);
    }
}

fn apply_style_from(format: &FormatMap, element: &Handle, key: &str, css: &str) {
    if let Some(value) = format.get_str(key) {
        style::set_style(element, css, value);
    }
}

/// Expand a 1 to 4 value box shorthand into top, right, bottom, left.
fn expand_box_shorthand(value: &str) -> Option<[String; 4]> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [top, right, bottom, left] = match parts.as_slice() {
        [all] => [*all; 4],
        [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
        [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
        [top, right, bottom, left] => [*top, *right, *bottom, *left],
        _ => return None,
    };
    Some([
        top.to_string(),
        right.to_string(),
        bottom.to_string(),
        left.to_string(),
    ])
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];
const SIDE_KEYS: [&str; 4] = ["Top", "Right", "Bottom", "Left"];

/// Parse `margin`/`padding` style boxes: longhands win over the shorthand.
fn parse_box(format: &mut FormatMap, element: &Handle, default_style: &StyleMap, name: &str) {
    let explicit = style::element_style(element);
    let shorthand = explicit
        .get(name)
        .and_then(expand_box_shorthand)
        .or_else(|| default_style.get(name).and_then(expand_box_shorthand));

    for (i, side) in SIDES.iter().enumerate() {
        let longhand = format!("{name}-{side}");
        let value = explicit
            .get(&longhand)
            .map(str::to_string)
            .or_else(|| shorthand.as_ref().map(|s| s[i].clone()))
            .or_else(|| default_style.get(&longhand).map(str::to_string));
        if let Some(value) = value.filter(|v| v != "inherit") {
            format.set(&format!("{name}{}", SIDE_KEYS[i]), value);
        }
    }
}

fn apply_box(format: &FormatMap, element: &Handle, name: &str) {
    for (i, side) in SIDES.iter().enumerate() {
        if let Some(value) = format.get_str(&format!("{name}{}", SIDE_KEYS[i])) {
            style::set_style(element, &format!("{name}-{side}"), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_shorthand_expands_like_css() {
        assert_eq!(
            expand_box_shorthand("1px 2px").unwrap(),
            ["1px", "2px", "1px", "2px"].map(String::from)
        );
        assert_eq!(
            expand_box_shorthand("1px 2px 3px").unwrap(),
            ["1px", "2px", "3px", "2px"].map(String::from)
        );
        assert!(expand_box_shorthand("").is_none());
        assert!(expand_box_shorthand("1 2 3 4 5").is_none());
    }
}
