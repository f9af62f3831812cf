//! Content model → markup tree
//!
//!     The writer walks the model in document order and fills the tree root. Existing children
//!     of the root are reused where the model still points at them (cached elements) and the
//!     rest are replaced, so writing a model back into the tree it came from only touches what
//!     changed.
//!
//!     Formats are written with the composed applier registry. A key is only written when the
//!     element's tag or its surroundings do not already imply the same value (see
//!     [`context::without_implied`]), which keeps `<h1>` free of a repeated `font-weight`.
//!
//!     Selection is recorded while writing and resolved once the tree is final.
//!
//! Usage:
//!
//!     let mut tree = MarkupTree::parse_fragment("")?;
//!     let options = ModelToDomOptions::default();
//!     let selection = content_model_to_dom(&mut tree, &mut model, &options, None);

pub mod context;
pub mod handlers;
pub mod selection;

pub use context::{without_implied, ImplicitFormat, ModelToDomContext};
pub use selection::{RecordedPosition, SelectionRecorder};

use crate::dom::{DomSelection, MarkupTree};
use crate::format::{FormatApplier, FormatOverrides};
use crate::model::ContentModelDocument;
use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

/// The selection of the written tree, in tree coordinates.
pub type ResolvedSelection = DomSelection;

/// Per-call settings of a model → tree conversion.
#[derive(Debug, Clone)]
pub struct ModelToDomOptions {
    pub applier_overrides: FormatOverrides<FormatApplier>,
    /// Move cached elements into place instead of creating new ones.
    pub reuse_cached_elements: bool,
    /// Join plain text segments that end up next to each other into one text node.
    pub merge_adjacent_text: bool,
}

impl Default for ModelToDomOptions {
    fn default() -> Self {
        Self {
            applier_overrides: FormatOverrides::default(),
            reuse_cached_elements: true,
            merge_adjacent_text: true,
        }
    }
}

/// What a node handed to the creation callback stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelNodeKind {
    Paragraph,
    Table,
    TableRow,
    TableCell,
    Divider,
    Entity,
    FormatContainer,
    ListItem,
    List,
    General,
    Text,
    Br,
    Image,
    SegmentWrapper,
    Link,
    Code,
}

/// Write `model` into the children of the tree root.
///
/// `on_node_created` sees every element or text node the writer creates or reuses, together
/// with the kind of model node it stands for. The model's cached element ids are updated to
/// the written nodes.
pub fn content_model_to_dom(
    tree: &mut MarkupTree,
    model: &mut ContentModelDocument,
    options: &ModelToDomOptions,
    on_node_created: Option<&mut dyn FnMut(ModelNodeKind, &Handle)>,
) -> Option<ResolvedSelection> {
    let mut context = ModelToDomContext::with_observer(options, on_node_created);
    context.nodes = std::mem::take(tree.nodes_mut());

    let root = tree.root().clone();
    handlers::handle_block_group_children(&root, model, &mut context);

    let selection = context.selection.resolve();
    *tree.nodes_mut() = std::mem::take(&mut context.nodes);

    tracing::debug!(
        blocks = model.blocks.len(),
        has_selection = selection.is_some(),
        "wrote content model"
    );
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_to_model::{dom_to_content_model, DomToModelOptions};
    use crate::format::FormatCategory;
    use crate::model::FormatMap;
    use std::rc::Rc;

    fn loud(_: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
        crate::dom::node::set_attribute(element, "data-loud", "1");
    }

    #[test]
    fn writing_back_reuses_the_source_elements() {
        let mut tree = MarkupTree::parse_fragment("<div>a</div><p>b</p>").unwrap();
        let before = crate::dom::tree::children(tree.root());
        let mut model = dom_to_content_model(&mut tree, &DomToModelOptions::default(), None);
        content_model_to_dom(&mut tree, &mut model, &ModelToDomOptions::default(), None);

        let after = crate::dom::tree::children(tree.root());
        assert_eq!(tree.inner_html().unwrap(), "<div>a</div><p>b</p>");
        assert!(Rc::ptr_eq(&before[0], &after[0]));
        assert!(Rc::ptr_eq(&before[1], &after[1]));
    }

    #[test]
    fn reuse_can_be_turned_off() {
        let mut tree = MarkupTree::parse_fragment("<div>a</div>").unwrap();
        let before = crate::dom::tree::children(tree.root());
        let mut model = dom_to_content_model(&mut tree, &DomToModelOptions::default(), None);
        let options = ModelToDomOptions {
            reuse_cached_elements: false,
            ..ModelToDomOptions::default()
        };
        content_model_to_dom(&mut tree, &mut model, &options, None);

        let after = crate::dom::tree::children(tree.root());
        assert_eq!(after.len(), 1);
        assert!(!Rc::ptr_eq(&before[0], &after[0]));
    }

    #[test]
    fn callback_sees_created_nodes_in_order() {
        let mut tree = MarkupTree::parse_fragment("<div><b>x</b></div>").unwrap();
        let mut model = dom_to_content_model(&mut tree, &DomToModelOptions::default(), None);
        let mut target = MarkupTree::parse_fragment("").unwrap();
        let mut kinds = Vec::new();
        let mut record = |kind: ModelNodeKind, _: &Handle| kinds.push(kind);
        content_model_to_dom(
            &mut target,
            &mut model,
            &ModelToDomOptions::default(),
            Some(&mut record),
        );
        assert_eq!(
            kinds,
            vec![
                ModelNodeKind::Paragraph,
                ModelNodeKind::Text,
                ModelNodeKind::SegmentWrapper
            ]
        );
    }

    #[test]
    fn additional_appliers_run_after_builtins() {
        let mut tree = MarkupTree::parse_fragment("<div style=\"text-align: right\">a</div>")
            .unwrap();
        let mut model = dom_to_content_model(&mut tree, &DomToModelOptions::default(), None);
        let options = ModelToDomOptions {
            applier_overrides: FormatOverrides::new()
                .with_additional(FormatCategory::Block, loud as FormatApplier),
            ..ModelToDomOptions::default()
        };
        let mut target = MarkupTree::parse_fragment("").unwrap();
        content_model_to_dom(&mut target, &mut model, &options, None);
        insta::assert_snapshot!(
            target.inner_html().unwrap(),
            @r#"<div style="text-align: right" data-loud="1">a</div>"#
        );
    }
}
