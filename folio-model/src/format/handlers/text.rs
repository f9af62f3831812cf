//! Segment-level handlers: font, color and decoration.

use super::{apply_style_from, parse_style_into, style_value};
use crate::dom::{style, StyleMap};
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;

pub fn parse_bold(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    if let Some(weight) = style_value(element, default_style, "font-weight") {
        let bold = match weight.as_str() {
            "bold" | "bolder" => true,
            "normal" | "lighter" => false,
            numeric => match numeric.parse::<u32>() {
                Ok(n) => n >= 600,
                Err(_) => return,
            },
        };
        format.set("bold", bold);
    }
}

pub fn apply_bold(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if let Some(bold) = format.get_bool("bold") {
        style::set_style(element, "font-weight", if bold { "bold" } else { "normal" });
    }
}

pub fn parse_italic(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    if let Some(font_style) = style_value(element, default_style, "font-style") {
        match font_style.as_str() {
            "italic" | "oblique" => format.set("italic", true),
            "normal" => format.set("italic", false),
            _ => {}
        }
    }
}

pub fn apply_italic(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if let Some(italic) = format.get_bool("italic") {
        style::set_style(element, "font-style", if italic { "italic" } else { "normal" });
    }
}

fn has_decoration(value: &str, token: &str) -> bool {
    value.split_whitespace().any(|t| t == token)
}

/// Decoration lines are read from `text-decoration` or `text-decoration-line`. An explicit
/// value without the token turns the flag off; a default one only turns it on.
fn parse_decoration(
    format: &mut FormatMap,
    element: &Handle,
    default_style: &StyleMap,
    token: &str,
    key: &str,
) {
    let explicit = style::get_style(element, "text-decoration")
        .or_else(|| style::get_style(element, "text-decoration-line"));
    match explicit {
        Some(value) if value != "inherit" => format.set(key, has_decoration(&value, token)),
        _ => {
            if default_style
                .get("text-decoration")
                .is_some_and(|v| has_decoration(v, token))
            {
                format.set(key, true);
            }
        }
    }
}

/// Add or drop one token of the element's `text-decoration`.
fn apply_decoration(element: &Handle, token: &str, on: bool) {
    let current = style::get_style(element, "text-decoration").unwrap_or_default();
    let mut tokens: Vec<&str> = current
        .split_whitespace()
        .filter(|t| *t != token && *t != "none")
        .collect();
    if on {
        tokens.push(token);
    }
    if tokens.is_empty() {
        style::set_style(element, "text-decoration", "none");
    } else {
        style::set_style(element, "text-decoration", &tokens.join(" "));
    }
}

pub fn parse_underline(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_decoration(format, element, default_style, "underline", "underline");
}

pub fn apply_underline(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if let Some(on) = format.get_bool("underline") {
        apply_decoration(element, "underline", on);
    }
}

pub fn parse_strikethrough(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_decoration(format, element, default_style, "line-through", "strikethrough");
}

pub fn apply_strikethrough(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    if let Some(on) = format.get_bool("strikethrough") {
        apply_decoration(element, "line-through", on);
    }
}

pub fn parse_super_or_sub(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    if let Some(align) = style_value(element, default_style, "vertical-align") {
        match align.as_str() {
            "super" | "sub" => format.set("superOrSubScript", align),
            "baseline" => {
                format.remove("superOrSubScript");
            }
            _ => {}
        }
    }
}

pub fn apply_super_or_sub(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "superOrSubScript", "vertical-align");
}

pub fn parse_font_family(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_style_into(format, element, default_style, "font-family", "fontFamily");
    if !format.contains("fontFamily") {
        if let Some(face) = font_tag_attribute(element, "face") {
            format.set("fontFamily", face);
        }
    }
}

pub fn apply_font_family(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "fontFamily", "font-family");
}

/// Legacy `<font size>` scale.
const FONT_SIZES: [&str; 7] = ["10px", "13px", "16px", "18px", "24px", "32px", "48px"];

pub fn parse_font_size(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    if let Some(size) = style::get_style(element, "font-size") {
        if size != "inherit" {
            format.set("fontSize", size);
            return;
        }
    }
    if let Some(size) = font_tag_attribute(element, "size") {
        if let Some(px) = size
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| FONT_SIZES.get(n.saturating_sub(1)))
        {
            format.set("fontSize", *px);
            return;
        }
    }
    if let Some(size) = default_style.get("font-size") {
        format.set("fontSize", size);
    }
}

pub fn apply_font_size(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "fontSize", "font-size");
}

pub fn parse_text_color(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_style_into(format, element, default_style, "color", "textColor");
    if !format.contains("textColor") {
        if let Some(color) = font_tag_attribute(element, "color") {
            format.set("textColor", color);
        }
    }
}

pub fn apply_text_color(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "textColor", "color");
}

pub fn parse_background_color(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    let value = style_value(element, default_style, "background-color")
        .or_else(|| crate::dom::node::get_attribute(element, "bgcolor"));
    match value.as_deref() {
        Some("transparent") | None => {}
        Some(color) => format.set("backgroundColor", color),
    }
}

pub fn apply_background_color(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "backgroundColor", "background-color");
}

pub fn parse_letter_spacing(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_style_into(format, element, default_style, "letter-spacing", "letterSpacing");
}

pub fn apply_letter_spacing(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "letterSpacing", "letter-spacing");
}

pub fn parse_line_height(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    default_style: &StyleMap,
) {
    parse_style_into(format, element, default_style, "line-height", "lineHeight");
}

pub fn apply_line_height(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    apply_style_from(format, element, "lineHeight", "line-height");
}

fn font_tag_attribute(element: &Handle, name: &str) -> Option<String> {
    if crate::dom::node::is_tag(element, "font") {
        crate::dom::node::get_attribute(element, name)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::create_element;
    use crate::dom::style::default_style;
    use crate::dom_to_model::{DomToModelContext, DomToModelOptions};

    fn parse(
        parser: fn(&mut FormatMap, &Handle, &DomToModelContext, &StyleMap),
        tag: &str,
        attrs: Vec<(&str, &str)>,
    ) -> FormatMap {
        let context = DomToModelContext::new(&DomToModelOptions::default());
        let element = create_element(tag, attrs);
        let mut format = FormatMap::new();
        parser(&mut format, &element, &context, &default_style(tag));
        format
    }

    #[test]
    fn bold_reads_defaults_and_numeric_weights() {
        assert!(parse(parse_bold, "b", vec![]).flag("bold"));
        assert!(parse(parse_bold, "span", vec![("style", "font-weight: 700")]).flag("bold"));
        assert_eq!(
            parse(parse_bold, "b", vec![("style", "font-weight: normal")]).get_bool("bold"),
            Some(false)
        );
        assert!(parse(parse_bold, "span", vec![]).is_empty());
    }

    #[test]
    fn explicit_decoration_turns_default_off() {
        assert!(parse(parse_underline, "u", vec![]).flag("underline"));
        assert_eq!(
            parse(parse_underline, "a", vec![("style", "text-decoration: none")])
                .get_bool("underline"),
            Some(false)
        );
        let both = vec![("style", "text-decoration: underline line-through")];
        assert!(parse(parse_strikethrough, "span", both).flag("strikethrough"));
    }

    #[test]
    fn font_tag_attributes_are_read() {
        let attrs = vec![("face", "Arial"), ("size", "3"), ("color", "red")];
        assert_eq!(
            parse(parse_font_family, "font", attrs.clone()).get_str("fontFamily"),
            Some("Arial")
        );
        assert_eq!(
            parse(parse_font_size, "font", attrs.clone()).get_str("fontSize"),
            Some("16px")
        );
        assert_eq!(
            parse(parse_text_color, "font", attrs).get_str("textColor"),
            Some("red")
        );
        assert!(parse(parse_font_size, "span", vec![("size", "3")]).is_empty());
    }

    #[test]
    fn decoration_tokens_combine_on_apply() {
        let element = create_element("span", vec![]);
        apply_decoration(&element, "underline", true);
        apply_decoration(&element, "line-through", true);
        assert_eq!(
            style::get_style(&element, "text-decoration").as_deref(),
            Some("underline line-through")
        );
        apply_decoration(&element, "underline", false);
        apply_decoration(&element, "line-through", false);
        assert_eq!(
            style::get_style(&element, "text-decoration").as_deref(),
            Some("none")
        );
    }
}
