//! Shared helpers for the integration tests.

use folio_model::model::{ListItem, Table};
use folio_model::{
    content_model_to_dom, dom_to_content_model, Block, ContentModelDocument, DomSelection,
    DomToModelOptions, MarkupTree, ModelToDomOptions, ResolvedSelection,
};

pub fn convert(html: &str) -> (MarkupTree, ContentModelDocument) {
    convert_with(html, &DomToModelOptions::default(), None)
}

pub fn convert_with(
    html: &str,
    options: &DomToModelOptions,
    selection: Option<&DomSelection>,
) -> (MarkupTree, ContentModelDocument) {
    let mut tree = MarkupTree::parse_fragment(html).unwrap();
    let model = dom_to_content_model(&mut tree, options, selection);
    (tree, model)
}

/// Convert without keeping element references, so the model can be written anywhere.
pub fn detached_model(html: &str) -> ContentModelDocument {
    let options = DomToModelOptions {
        allow_cache_element: false,
        ..DomToModelOptions::default()
    };
    convert_with(html, &options, None).1
}

/// Write `model` into an empty tree and return the markup.
pub fn write_fresh(model: &mut ContentModelDocument) -> String {
    let mut tree = MarkupTree::parse_fragment("").unwrap();
    content_model_to_dom(&mut tree, model, &ModelToDomOptions::default(), None);
    tree.inner_html().unwrap()
}

/// Write `model` back into the tree it was read from.
pub fn write_back(
    tree: &mut MarkupTree,
    model: &mut ContentModelDocument,
) -> Option<ResolvedSelection> {
    content_model_to_dom(tree, model, &ModelToDomOptions::default(), None)
}

pub fn list_items(blocks: &[Block]) -> Vec<&ListItem> {
    blocks.iter().filter_map(Block::as_list_item).collect()
}

pub fn first_table(model: &ContentModelDocument) -> &Table {
    model.blocks.iter().find_map(Block::as_table).unwrap()
}

/// Texts of the first paragraph, markers shown as `|`.
pub fn paragraph_shape(model: &ContentModelDocument) -> Vec<String> {
    model.blocks[0]
        .as_paragraph()
        .unwrap()
        .segments
        .iter()
        .map(|segment| match segment.as_text() {
            Some(text) => text.text.clone(),
            None if segment.is_marker() => "|".to_string(),
            None if segment.is_br() => "<br>".to_string(),
            None => "?".to_string(),
        })
        .collect()
}
