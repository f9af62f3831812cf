//! Read and create individual markup nodes.

use html5ever::tendril::StrTendril;
use html5ever::{ns, Attribute, LocalName, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Coarse classification of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Document or fragment containers
    Fragment,
    /// Comments, doctypes, processing instructions
    Other,
}

pub fn kind(node: &Handle) -> NodeKind {
    match node.data {
        NodeData::Element { .. } => NodeKind::Element,
        NodeData::Text { .. } => NodeKind::Text,
        NodeData::Document => NodeKind::Fragment,
        _ => NodeKind::Other,
    }
}

pub fn is_element(node: &Handle) -> bool {
    kind(node) == NodeKind::Element
}

pub fn is_text(node: &Handle) -> bool {
    kind(node) == NodeKind::Text
}

/// Lowercase local tag name of an element.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_ascii_lowercase()),
        _ => None,
    }
}

pub fn is_tag(node: &Handle, tag: &str) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => name.local.as_ref().eq_ignore_ascii_case(tag),
        _ => false,
    }
}

pub fn get_attribute(node: &Handle, attr: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(attr))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn has_attribute(node: &Handle, attr: &str) -> bool {
    get_attribute(node, attr).is_some()
}

/// Set (or replace) an attribute value. No-op on non-elements.
pub fn set_attribute(node: &Handle, attr: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs
            .iter_mut()
            .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(attr))
        {
            Some(existing) => existing.value = StrTendril::from(value),
            None => attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr)),
                value: StrTendril::from(value),
            }),
        }
    }
}

pub fn remove_attribute(node: &Handle, attr: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs
            .borrow_mut()
            .retain(|a| !a.name.local.as_ref().eq_ignore_ascii_case(attr));
    }
}

/// All attributes in source order.
pub fn attributes(node: &Handle) -> Vec<(String, String)> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|a| (a.name.local.as_ref().to_string(), a.value.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn class_list(node: &Handle) -> Vec<String> {
    get_attribute(node, "class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn has_class(node: &Handle, class: &str) -> bool {
    class_list(node).iter().any(|c| c == class)
}

/// Text of a text node.
pub fn text_of(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// Number of characters of a text node (selection offsets count chars).
pub fn text_len(node: &Handle) -> usize {
    text_of(node).map(|t| t.chars().count()).unwrap_or(0)
}

pub fn set_text(node: &Handle, text: &str) {
    if let NodeData::Text { contents } = &node.data {
        *contents.borrow_mut() = StrTendril::from(text);
    }
}

/// Concatenated text of a subtree.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

/// Create a detached element with the given attributes.
pub fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: StrTendril::from(value),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a detached text node.
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(StrTendril::from(text)),
        },
    })
}

/// Create a detached fragment container.
pub fn create_fragment() -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Document,
    })
}

/// Copy a node without its children.
pub fn clone_shallow(node: &Handle) -> Handle {
    match &node.data {
        NodeData::Element { name, attrs, .. } => Rc::new(Node {
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
            data: NodeData::Element {
                name: name.clone(),
                attrs: RefCell::new(attrs.borrow().clone()),
                template_contents: Default::default(),
                mathml_annotation_xml_integration_point: false,
            },
        }),
        NodeData::Text { contents } => create_text(&contents.borrow()),
        _ => create_fragment(),
    }
}
