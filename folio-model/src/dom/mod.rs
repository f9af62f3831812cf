//! The live markup tree
//!
//! The tree is an `html5ever` document held in `markup5ever_rcdom` reference-counted nodes.
//! [`MarkupTree`] owns the root container plus a [`NodeStore`]: content-model nodes never hold
//! `Handle`s directly, they hold [`NodeId`]s into the store, so a model can be cloned or
//! serialized without dragging tree ownership along. The writer resolves ids back to nodes
//! only when it emits them.

pub mod node;
pub mod selection;
pub mod style;
pub mod tree;

use crate::error::ConversionError;
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, serialize};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

pub use node::NodeKind;
pub use selection::{DomPoint, DomSelection, ImageSelection, RangeSelection, TableSelection};
pub use style::StyleMap;

/// Opaque handle to a node registered in a [`NodeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Arena of tree nodes referenced from a content model.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: Vec<Handle>,
    index: HashMap<*const markup5ever_rcdom::Node, NodeId>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, returning the existing id when it is already known.
    pub fn register(&mut self, node: &Handle) -> NodeId {
        let key = Rc::as_ptr(node);
        if let Some(id) = self.index.get(&key) {
            return *id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node.clone());
        self.index.insert(key, id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Handle> {
        self.nodes.get(id.0 as usize)
    }

    /// Resolve an id, failing for handles that do not belong to this store.
    pub fn resolve(&self, id: NodeId) -> Result<&Handle, ConversionError> {
        self.get(id).ok_or(ConversionError::UnknownNode(id.0))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A markup tree rooted at a container element, plus the node arena for model handles.
pub struct MarkupTree {
    root: Handle,
    nodes: NodeStore,
    // Keeps the owning document (and the root's ancestors) alive for parsed trees.
    _document: Option<Handle>,
}

impl MarkupTree {
    /// Wrap an existing container node.
    pub fn from_root(root: Handle) -> Self {
        Self {
            root,
            nodes: NodeStore::new(),
            _document: None,
        }
    }

    /// Parse an HTML fragment; the resulting `<body>` element becomes the root container.
    pub fn parse_fragment(html: &str) -> Result<Self, ConversionError> {
        let dom: RcDom = parse_document(RcDom::default(), Default::default()).one(html);
        let body = tree::find_descendant(&dom.document, "body").ok_or_else(|| {
            ConversionError::ParseError("Document has no body element".to_string())
        })?;

        Ok(Self {
            root: body,
            nodes: NodeStore::new(),
            _document: Some(dom.document.clone()),
        })
    }

    pub fn root(&self) -> &Handle {
        &self.root
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeStore {
        &mut self.nodes
    }

    /// Serialize the children of the root container.
    pub fn inner_html(&self) -> Result<String, ConversionError> {
        serialize_children(&self.root)
    }
}

/// Serialize the children of `node` to an HTML string.
pub fn serialize_children(node: &Handle) -> Result<String, ConversionError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts).map_err(|e| {
        ConversionError::SerializationError(format!("HTML serialization failed: {e}"))
    })?;

    String::from_utf8(output)
        .map_err(|e| ConversionError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fragment_roots_at_body() {
        let tree = MarkupTree::parse_fragment("<div>hello</div>").unwrap();
        assert_eq!(node::tag_name(tree.root()).as_deref(), Some("body"));
        assert_eq!(tree.inner_html().unwrap(), "<div>hello</div>");
    }

    #[test]
    fn register_dedupes_by_identity() {
        let tree = MarkupTree::parse_fragment("<p>a</p><p>b</p>").unwrap();
        let children = tree::children(tree.root());
        let mut store = NodeStore::new();
        let a = store.register(&children[0]);
        let b = store.register(&children[1]);
        assert_ne!(a, b);
        assert_eq!(store.register(&children[0]), a);
        assert_eq!(store.len(), 2);
        assert!(Rc::ptr_eq(store.get(a).unwrap(), &children[0]));
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let store = NodeStore::new();
        assert_eq!(
            store.resolve(NodeId(7)).unwrap_err(),
            ConversionError::UnknownNode(7)
        );
    }
}
