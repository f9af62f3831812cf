//! Segment writers and the insertion cursor they share.

use super::handle_block_group_children;
use crate::dom::{node, tree};
use crate::format::FormatCategory;
use crate::model::{Code, FormatMap, Link, Segment};
use crate::model_to_dom::context::{only_category, without_implied, ModelToDomContext};
use crate::model_to_dom::selection::RecordedPosition;
use crate::model_to_dom::ModelNodeKind;
use markup5ever_rcdom::Handle;
use std::rc::Rc;

/// Where segments of one paragraph are inserted: before `ref_node` in `parent`, or appended
/// when there is no reference.
pub struct SegmentCursor {
    pub parent: Handle,
    pub ref_node: Option<Handle>,
    last: Option<Handle>,
}

impl SegmentCursor {
    pub fn new(parent: Handle, ref_node: Option<Handle>) -> Self {
        Self {
            parent,
            ref_node,
            last: None,
        }
    }

    pub fn insert(&mut self, node: &Handle) {
        match &self.ref_node {
            Some(current) if Rc::ptr_eq(current, node) => {
                self.ref_node = tree::next_sibling(current);
            }
            _ => tree::insert_before(&self.parent, node, self.ref_node.as_ref()),
        }
        self.last = Some(node.clone());
    }

    /// The caret position right after everything written so far.
    pub fn position(&self) -> RecordedPosition {
        match &self.last {
            Some(last) if node::is_text(last) => RecordedPosition::Text {
                node: last.clone(),
                offset: node::text_len(last),
            },
            Some(last) => RecordedPosition::After(last.clone()),
            None => {
                let before = match &self.ref_node {
                    Some(current) => tree::previous_sibling(current),
                    None => tree::last_child(&self.parent),
                };
                match before {
                    Some(before) => RecordedPosition::After(before),
                    None => RecordedPosition::Start(self.parent.clone()),
                }
            }
        }
    }

    fn last_text(&self) -> Option<&Handle> {
        self.last.as_ref().filter(|last| node::is_text(last))
    }
}

/// Write one segment at the cursor.
pub fn handle_segment(
    cursor: &mut SegmentCursor,
    segment: &mut Segment,
    context: &mut ModelToDomContext<'_>,
) {
    let selected = segment.is_selected();
    if selected {
        context.selection.open(cursor.position());
    }

    match segment {
        Segment::SelectionMarker(_) => {}
        Segment::Text(text) => {
            let wrapped = text.link.is_some()
                || text.code.is_some()
                || !segment_span_format(&text.format, text.code.is_some(), context).is_empty();
            match cursor.last_text().cloned() {
                Some(last) if context.merge_adjacent_text && !wrapped => {
                    let mut merged = node::text_of(&last).unwrap_or_default();
                    merged.push_str(&text.text);
                    node::set_text(&last, &merged);
                }
                _ => {
                    let text_node = node::create_text(&text.text);
                    context.notify(ModelNodeKind::Text, &text_node);
                    let outer = wrap_segment(
                        &text_node,
                        &text.format,
                        text.link.as_ref(),
                        text.code.as_ref(),
                        context,
                    );
                    cursor.insert(&outer);
                }
            }
        }
        Segment::Br(br) => {
            let element = node::create_element("br", vec![]);
            context.notify(ModelNodeKind::Br, &element);
            let outer = wrap_segment(
                &element,
                &br.format,
                br.link.as_ref(),
                br.code.as_ref(),
                context,
            );
            cursor.insert(&outer);
        }
        Segment::Image(image) => {
            let element = node::create_element("img", vec![("src", &image.src)]);
            if let Some(alt) = &image.alt {
                node::set_attribute(&element, "alt", alt);
            }
            if let Some(title) = &image.title {
                node::set_attribute(&element, "title", title);
            }
            context
                .appliers
                .apply(FormatCategory::Image, &image.format, &element, context);
            context
                .appliers
                .apply(FormatCategory::Dataset, &image.dataset, &element, context);
            if image.is_selected_as_image_selection {
                context.selection.image = Some(element.clone());
            }
            context.notify(ModelNodeKind::Image, &element);

            let outer = wrap_segment(
                &element,
                &image.format,
                image.link.as_ref(),
                image.code.as_ref(),
                context,
            );
            cursor.insert(&outer);
        }
        Segment::Entity(entity) => {
            let wrapper = match context.nodes.resolve(entity.wrapper) {
                Ok(wrapper) => wrapper.clone(),
                Err(err) => {
                    tracing::debug!(error = %err, "skipping entity with an unknown wrapper");
                    return;
                }
            };
            let mut entity_format = FormatMap::new();
            if let Some(entity_type) = &entity.entity_format.entity_type {
                entity_format.set("entityType", entity_type.as_str());
            }
            if let Some(id) = &entity.entity_format.id {
                entity_format.set("id", id.as_str());
            }
            entity_format.set("isReadonly", entity.entity_format.is_readonly);
            context
                .appliers
                .apply(FormatCategory::Entity, &entity_format, &wrapper, context);
            cursor.insert(&wrapper);
            context.notify(ModelNodeKind::Entity, &wrapper);
        }
        Segment::General(general) => {
            let source = match context.nodes.resolve(general.element) {
                Ok(source) => source.clone(),
                Err(err) => {
                    tracing::debug!(error = %err, "skipping general segment without its element");
                    return;
                }
            };
            let element = node::clone_shallow(&source);
            general.element = context.nodes.register(&element);
            handle_block_group_children(&element, general, context);
            context.notify(ModelNodeKind::General, &element);

            let outer = wrap_segment(
                &element,
                &general.format,
                general.link.as_ref(),
                general.code.as_ref(),
                context,
            );
            cursor.insert(&outer);
        }
    }

    if selected {
        context.selection.close(cursor.position());
    }
}

/// Segment keys still to be written on a span: whatever the surroundings do not imply.
fn segment_span_format(
    format: &FormatMap,
    in_code: bool,
    context: &mut ModelToDomContext<'_>,
) -> FormatMap {
    let mut span_format = without_implied(
        &only_category(format, FormatCategory::Segment),
        &context.implicit.segment,
    );
    if in_code {
        let implied = context.implied("code", FormatCategory::Segment);
        span_format = without_implied(&span_format, &implied);
    }
    span_format
}

/// Wrap `inner` in code, then link, then span elements as its decorators and format require,
/// returning the outermost node.
fn wrap_segment(
    inner: &Handle,
    format: &FormatMap,
    link: Option<&Link>,
    code: Option<&Code>,
    context: &mut ModelToDomContext<'_>,
) -> Handle {
    let mut outer = inner.clone();

    if let Some(code) = code {
        let implied = context.implied("code", FormatCategory::Code);
        let code_format = without_implied(&code.format, &implied);
        let element = node::create_element("code", vec![]);
        tree::append_child(&element, &outer);
        context
            .appliers
            .apply(FormatCategory::Code, &code_format, &element, context);
        context.notify(ModelNodeKind::Code, &element);
        outer = element;
    }

    if let Some(link) = link {
        let implied = context.implied("a", FormatCategory::Link);
        let link_format = without_implied(&link.format, &implied);
        let element = node::create_element("a", vec![]);
        tree::append_child(&element, &outer);
        context
            .appliers
            .apply(FormatCategory::Link, &link_format, &element, context);
        context
            .appliers
            .apply(FormatCategory::Dataset, &link.dataset, &element, context);
        context.notify(ModelNodeKind::Link, &element);
        outer = element;
    }

    let span_format = segment_span_format(format, code.is_some(), context);
    if !span_format.is_empty() {
        let element = node::create_element("span", vec![]);
        tree::append_child(&element, &outer);
        context
            .appliers
            .apply(FormatCategory::Segment, &span_format, &element, context);
        context.notify(ModelNodeKind::SegmentWrapper, &element);
        outer = element;
    }

    outer
}
