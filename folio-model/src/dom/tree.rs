//! Structural navigation and mutation of the markup tree.
//!
//! `markup5ever_rcdom` keeps parents as weak references in a `Cell`, so every read takes the
//! value out and puts it back. All mutation goes through these helpers so parent links stay
//! consistent with the child vectors.

use super::node;
use markup5ever_rcdom::Handle;
use std::rc::Rc;

pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

/// Snapshot of the children, safe to iterate while mutating the tree.
pub fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

pub fn child_count(node: &Handle) -> usize {
    node.children.borrow().len()
}

pub fn first_child(node: &Handle) -> Option<Handle> {
    node.children.borrow().first().cloned()
}

pub fn last_child(node: &Handle) -> Option<Handle> {
    node.children.borrow().last().cloned()
}

/// Position of `node` among its parent's children.
pub fn index_in_parent(node: &Handle) -> Option<usize> {
    let parent = parent(node)?;
    let index = parent
        .children
        .borrow()
        .iter()
        .position(|c| Rc::ptr_eq(c, node));
    index
}

pub fn next_sibling(node: &Handle) -> Option<Handle> {
    let parent = parent(node)?;
    let index = index_in_parent(node)?;
    let next = parent.children.borrow().get(index + 1).cloned();
    next
}

pub fn previous_sibling(node: &Handle) -> Option<Handle> {
    let parent = parent(node)?;
    let index = index_in_parent(node)?;
    if index == 0 {
        return None;
    }
    let previous = parent.children.borrow().get(index - 1).cloned();
    previous
}

pub fn is_child_of(node: &Handle, parent_node: &Handle) -> bool {
    parent(node).is_some_and(|p| Rc::ptr_eq(&p, parent_node))
}

/// Detach a node from its parent. No-op for detached nodes.
pub fn remove(node: &Handle) {
    if let Some(parent) = parent(node) {
        parent.children.borrow_mut().retain(|c| !Rc::ptr_eq(c, node));
    }
    node.parent.set(None);
}

/// Insert `child` into `parent_node` before `reference`, or at the end when `reference` is
/// `None` or not a child of `parent_node`. The child is detached from any previous parent.
pub fn insert_before(parent_node: &Handle, child: &Handle, reference: Option<&Handle>) {
    remove(child);
    let mut children = parent_node.children.borrow_mut();
    let position = reference
        .and_then(|r| children.iter().position(|c| Rc::ptr_eq(c, r)))
        .unwrap_or(children.len());
    children.insert(position, child.clone());
    child.parent.set(Some(Rc::downgrade(parent_node)));
}

pub fn append_child(parent_node: &Handle, child: &Handle) {
    insert_before(parent_node, child, None);
}

/// Move every child of `from` to the end of `to`.
pub fn move_children(from: &Handle, to: &Handle) {
    for child in children(from) {
        append_child(to, &child);
    }
}

/// Wrap `node` in place with a new element of the given tag and return the wrapper.
pub fn wrap(node: &Handle, tag: &str) -> Handle {
    let wrapper = node::create_element(tag, vec![]);
    if let Some(parent_node) = parent(node) {
        insert_before(&parent_node, &wrapper, Some(node));
    }
    append_child(&wrapper, node);
    wrapper
}

/// Whether `node` is `ancestor` or sits below it.
pub fn contains(ancestor: &Handle, node: &Handle) -> bool {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if Rc::ptr_eq(&n, ancestor) {
            return true;
        }
        current = parent(&n);
    }
    false
}

/// Depth-first search for the first element with the given tag.
pub fn find_descendant(node: &Handle, tag: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if node::is_tag(child, tag) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant(child, tag) {
            return Some(found);
        }
    }
    None
}

/// All descendant elements with the given tag, in document order.
pub fn find_all(node: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect_tag(node, tag, &mut found);
    found
}

fn collect_tag(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if node::is_tag(child, tag) {
            found.push(child.clone());
        }
        collect_tag(child, tag, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::{create_element, create_text, tag_name};

    #[test]
    fn insert_before_reparents() {
        let a = create_element("div", vec![]);
        let b = create_element("div", vec![]);
        let x = create_text("x");
        let y = create_text("y");
        append_child(&a, &x);
        append_child(&a, &y);
        insert_before(&b, &y, None);
        assert_eq!(child_count(&a), 1);
        assert!(is_child_of(&y, &b));

        insert_before(&a, &y, Some(&x));
        assert_eq!(index_in_parent(&y), Some(0));
        assert_eq!(index_in_parent(&x), Some(1));
        assert_eq!(child_count(&b), 0);
    }

    #[test]
    fn siblings_and_contains() {
        let root = create_element("div", vec![]);
        let p = create_element("p", vec![]);
        let t = create_text("t");
        append_child(&root, &p);
        append_child(&p, &t);
        let q = create_element("p", vec![]);
        append_child(&root, &q);

        assert!(Rc::ptr_eq(&next_sibling(&p).unwrap(), &q));
        assert!(Rc::ptr_eq(&previous_sibling(&q).unwrap(), &p));
        assert!(contains(&root, &t));
        assert!(!contains(&q, &t));
    }

    #[test]
    fn wrap_keeps_position() {
        let root = create_element("div", vec![]);
        let a = create_text("a");
        let b = create_text("b");
        append_child(&root, &a);
        append_child(&root, &b);
        let span = wrap(&b, "span");
        assert_eq!(tag_name(&children(&root)[1]).as_deref(), Some("span"));
        assert!(is_child_of(&b, &span));
    }
}
