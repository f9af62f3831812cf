//! Inline style access and tag default styles
//!
//! Styles are read from and written to the `style` attribute. [`default_style`] is the
//! built-in user-agent table used as the implicit style of a tag: parsers receive it so they
//! can tell an explicit value apart from an absent one, and [`is_block_element`] derives the
//! block-level classification from it.

use super::node;
use markup5ever_rcdom::Handle;

/// Ordered CSS declarations (property names lowercased).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration list such as `color: red; font-weight:bold`.
    pub fn parse(css: &str) -> Self {
        let mut map = Self::new();
        for declaration in css.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                let name = name.trim().to_ascii_lowercase();
                let value = value.trim();
                if !name.is_empty() && !value.is_empty() {
                    map.set(&name, value);
                }
            }
        }
        map
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut map = Self::new();
        for (name, value) in pairs {
            map.set(name, value);
        }
        map
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn to_css(&self) -> String {
        self.entries
            .iter()
            .map(|(n, v)| format!("{n}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Inline style of an element.
pub fn element_style(element: &Handle) -> StyleMap {
    node::get_attribute(element, "style")
        .map(|s| StyleMap::parse(&s))
        .unwrap_or_default()
}

pub fn get_style(element: &Handle, name: &str) -> Option<String> {
    element_style(element).get(name).map(str::to_string)
}

/// Set one inline style property, keeping the others.
pub fn set_style(element: &Handle, name: &str, value: &str) {
    let mut style = element_style(element);
    style.set(name, value);
    write_style(element, &style);
}

pub fn remove_style(element: &Handle, name: &str) {
    let mut style = element_style(element);
    style.remove(name);
    write_style(element, &style);
}

fn write_style(element: &Handle, style: &StyleMap) {
    if style.is_empty() {
        node::remove_attribute(element, "style");
    } else {
        node::set_attribute(element, "style", &style.to_css());
    }
}

/// Explicit inline value, falling back to the tag default.
pub fn style_or_default(element: &Handle, default_style: &StyleMap, name: &str) -> Option<String> {
    get_style(element, name).or_else(|| default_style.get(name).map(str::to_string))
}

const BLOCK_DISPLAY: &[&str] = &[
    "block",
    "flex",
    "grid",
    "list-item",
    "table",
    "table-row",
    "table-cell",
    "table-row-group",
    "table-header-group",
    "table-footer-group",
    "table-caption",
];

/// Block-level classification from the inline `display` or the tag default.
pub fn is_block_element(element: &Handle) -> bool {
    let display = match get_style(element, "display") {
        Some(display) => display,
        None => match node::tag_name(element) {
            Some(tag) => default_style(&tag).get("display").unwrap_or("inline").to_string(),
            None => return false,
        },
    };
    BLOCK_DISPLAY.contains(&display.as_str())
}

pub fn is_display_none(element: &Handle) -> bool {
    get_style(element, "display").as_deref() == Some("none")
}

/// Built-in default style of a tag.
pub fn default_style(tag: &str) -> StyleMap {
    let pairs: &[(&str, &str)] = match tag {
        "b" | "strong" => &[("font-weight", "bold")],
        "i" | "em" | "cite" | "dfn" | "var" => &[("font-style", "italic")],
        "u" | "ins" => &[("text-decoration", "underline")],
        "s" | "strike" | "del" => &[("text-decoration", "line-through")],
        "sub" => &[("vertical-align", "sub"), ("font-size", "smaller")],
        "sup" => &[("vertical-align", "super"), ("font-size", "smaller")],
        "code" | "kbd" | "samp" | "tt" => &[("font-family", "monospace")],
        "a" => &[("text-decoration", "underline")],
        "small" => &[("font-size", "smaller")],
        "big" => &[("font-size", "larger")],
        "h1" => &[
            ("display", "block"),
            ("font-size", "2em"),
            ("font-weight", "bold"),
            ("margin-top", "0.67em"),
            ("margin-bottom", "0.67em"),
        ],
        "h2" => &[
            ("display", "block"),
            ("font-size", "1.5em"),
            ("font-weight", "bold"),
            ("margin-top", "0.83em"),
            ("margin-bottom", "0.83em"),
        ],
        "h3" => &[
            ("display", "block"),
            ("font-size", "1.17em"),
            ("font-weight", "bold"),
            ("margin-top", "1em"),
            ("margin-bottom", "1em"),
        ],
        "h4" => &[
            ("display", "block"),
            ("font-weight", "bold"),
            ("margin-top", "1.33em"),
            ("margin-bottom", "1.33em"),
        ],
        "h5" => &[
            ("display", "block"),
            ("font-size", "0.83em"),
            ("font-weight", "bold"),
            ("margin-top", "1.67em"),
            ("margin-bottom", "1.67em"),
        ],
        "h6" => &[
            ("display", "block"),
            ("font-size", "0.67em"),
            ("font-weight", "bold"),
            ("margin-top", "2.33em"),
            ("margin-bottom", "2.33em"),
        ],
        "p" => &[
            ("display", "block"),
            ("margin-top", "1em"),
            ("margin-bottom", "1em"),
        ],
        "blockquote" => &[
            ("display", "block"),
            ("margin-top", "1em"),
            ("margin-bottom", "1em"),
            ("margin-left", "40px"),
            ("margin-right", "40px"),
        ],
        "pre" => &[
            ("display", "block"),
            ("font-family", "monospace"),
            ("white-space", "pre"),
            ("margin-top", "1em"),
            ("margin-bottom", "1em"),
        ],
        "center" => &[("display", "block"), ("text-align", "center")],
        "ol" | "ul" => &[
            ("display", "block"),
            ("margin-top", "1em"),
            ("margin-bottom", "1em"),
            ("padding-left", "40px"),
        ],
        "li" => &[("display", "list-item")],
        "table" => &[("display", "table"), ("box-sizing", "border-box")],
        "tbody" => &[("display", "table-row-group")],
        "thead" => &[("display", "table-header-group")],
        "tfoot" => &[("display", "table-footer-group")],
        "tr" => &[("display", "table-row")],
        "td" => &[("display", "table-cell")],
        "th" => &[
            ("display", "table-cell"),
            ("font-weight", "bold"),
            ("text-align", "center"),
        ],
        "caption" => &[("display", "table-caption")],
        "hr" => &[("display", "block")],
        "address" | "article" | "aside" | "body" | "dd" | "details" | "dialog" | "dir"
        | "div" | "dl" | "dt" | "fieldset" | "figcaption" | "figure" | "footer" | "form"
        | "header" | "hgroup" | "html" | "main" | "menu" | "nav" | "section" | "summary" => {
            &[("display", "block")]
        }
        _ => &[],
    };
    StyleMap::from_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::create_element;

    #[test]
    fn parse_skips_malformed_declarations() {
        let style = StyleMap::parse("color: red;;font-weight :bold; junk; width:");
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("font-weight"), Some("bold"));
        assert_eq!(style.get("width"), None);
        assert_eq!(style.to_css(), "color: red; font-weight: bold");
    }

    #[test]
    fn set_style_keeps_other_properties() {
        let el = create_element("span", vec![("style", "color: red")]);
        set_style(&el, "font-size", "10pt");
        set_style(&el, "color", "blue");
        assert_eq!(
            node::get_attribute(&el, "style").as_deref(),
            Some("color: blue; font-size: 10pt")
        );
        remove_style(&el, "color");
        remove_style(&el, "font-size");
        assert!(!node::has_attribute(&el, "style"));
    }

    #[test]
    fn block_classification_prefers_inline_display() {
        assert!(is_block_element(&create_element("div", vec![])));
        assert!(!is_block_element(&create_element("span", vec![])));
        assert!(is_block_element(&create_element(
            "span",
            vec![("style", "display: block")]
        )));
        assert!(!is_block_element(&create_element(
            "div",
            vec![("style", "display:inline-block")]
        )));
        assert!(!is_block_element(&create_element("custom-tag", vec![])));
    }
}
