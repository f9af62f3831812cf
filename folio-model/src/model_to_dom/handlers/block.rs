use super::{handle_block_group_children, reuse_cached_element};
use crate::dom::{node, tree};
use crate::format::FormatCategory;
use crate::model::{Divider, Entity, FormatContainer, FormatMap, GeneralBlock};
use crate::model_to_dom::context::{without_implied, ImplicitFormat, ModelToDomContext};
use crate::model_to_dom::ModelNodeKind;
use markup5ever_rcdom::Handle;

pub fn handle_divider(
    parent: &Handle,
    divider: &mut Divider,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    let tag = divider.tag_name.to_ascii_lowercase();
    let mut ref_node = ref_node;
    let element = match context.cached(divider.cached_element, &tag) {
        Some(element) => {
            node::remove_attribute(&element, "style");
            ref_node = reuse_cached_element(parent, &element, ref_node);
            element
        }
        None => {
            let element = node::create_element(&tag, vec![]);
            tree::insert_before(parent, &element, ref_node.as_ref());
            element
        }
    };

    let implied = context.implied(&tag, FormatCategory::Divider);
    let format = without_implied(&divider.format, &implied);
    context
        .appliers
        .apply(FormatCategory::Divider, &format, &element, context);
    divider.cached_element = Some(context.nodes.register(&element));
    context.notify(ModelNodeKind::Divider, &element);
    ref_node
}

/// A container element is always written fresh; its paragraphs see only its whitespace rule.
pub fn handle_format_container(
    parent: &Handle,
    container: &mut FormatContainer,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    let tag = container.tag_name.to_ascii_lowercase();
    let element = node::create_element(&tag, vec![]);
    tree::insert_before(parent, &element, ref_node.as_ref());

    let implied = context.implied(&tag, FormatCategory::Container);
    let format = without_implied(&container.format, &implied);
    context
        .appliers
        .apply(FormatCategory::Container, &format, &element, context);
    context.notify(ModelNodeKind::FormatContainer, &element);

    let mut block = FormatMap::new();
    if let Some(white_space) = container.format.get("whiteSpace") {
        block.set("whiteSpace", white_space.clone());
    }
    let implicit = ImplicitFormat {
        segment: context.implied(&tag, FormatCategory::Segment),
        block,
    };
    context.with_implicit(implicit, |ctx| {
        handle_block_group_children(&element, container, ctx)
    });
    ref_node
}

pub fn handle_entity_block(
    parent: &Handle,
    entity: &mut Entity,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    let wrapper = match context.nodes.resolve(entity.wrapper) {
        Ok(wrapper) => wrapper.clone(),
        Err(err) => {
            tracing::debug!(error = %err, "skipping entity block with an unknown wrapper");
            return ref_node;
        }
    };

    let mut format = FormatMap::new();
    if let Some(entity_type) = &entity.entity_format.entity_type {
        format.set("entityType", entity_type.as_str());
    }
    if let Some(id) = &entity.entity_format.id {
        format.set("id", id.as_str());
    }
    format.set("isReadonly", entity.entity_format.is_readonly);
    context
        .appliers
        .apply(FormatCategory::Entity, &format, &wrapper, context);

    let ref_node = reuse_cached_element(parent, &wrapper, ref_node);
    context.notify(ModelNodeKind::Entity, &wrapper);
    ref_node
}

/// The source element is moved into place when it already belongs to `parent`, otherwise a
/// shallow copy of it is inserted. Either way its children are rewritten from the model.
pub fn handle_general_block(
    parent: &Handle,
    general: &mut GeneralBlock,
    context: &mut ModelToDomContext<'_>,
    ref_node: Option<Handle>,
) -> Option<Handle> {
    let source = match context.nodes.resolve(general.element) {
        Ok(source) => source.clone(),
        Err(err) => {
            tracing::debug!(error = %err, "skipping general block without its element");
            return ref_node;
        }
    };

    let mut ref_node = ref_node;
    let element = if context.reuse_cached_elements && tree::is_child_of(&source, parent) {
        ref_node = reuse_cached_element(parent, &source, ref_node);
        source
    } else {
        let element = node::clone_shallow(&source);
        tree::insert_before(parent, &element, ref_node.as_ref());
        general.element = context.nodes.register(&element);
        element
    };
    context.notify(ModelNodeKind::General, &element);

    handle_block_group_children(&element, general, context);
    ref_node
}
