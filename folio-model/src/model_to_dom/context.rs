//! State threaded through one model → tree write.

use super::selection::SelectionRecorder;
use super::{ModelNodeKind, ModelToDomOptions};
use crate::dom::{node, style, NodeId, NodeStore};
use crate::dom_to_model::{DomToModelContext, DomToModelOptions};
use crate::format::{FormatAppliers, FormatCategory};
use crate::model::{FormatMap, ListLevel};
use markup5ever_rcdom::Handle;
use std::collections::HashMap;

/// Formats the surrounding elements already provide, so children do not repeat them.
#[derive(Debug, Clone, Default)]
pub struct ImplicitFormat {
    pub segment: FormatMap,
    pub block: FormatMap,
}

/// An open list element while consecutive list items are written.
#[derive(Debug, Clone)]
pub struct ListStackEntry {
    /// `None` for the container the outermost list lives in.
    pub level: Option<ListLevel>,
    pub node: Handle,
}

#[derive(Debug, Clone, Default)]
pub struct ListWriteState {
    pub node_stack: Vec<ListStackEntry>,
    pub thread_counts: Vec<u32>,
}

pub struct ModelToDomContext<'a> {
    pub appliers: FormatAppliers,
    pub nodes: NodeStore,
    pub reuse_cached_elements: bool,
    pub merge_adjacent_text: bool,
    pub implicit: ImplicitFormat,
    pub list: ListWriteState,
    pub selection: SelectionRecorder,
    // Parses tag defaults for `implied`.
    defaults_parser: DomToModelContext,
    implied_cache: HashMap<(String, FormatCategory), FormatMap>,
    on_node_created: Option<&'a mut dyn FnMut(ModelNodeKind, &Handle)>,
}

impl ModelToDomContext<'static> {
    pub fn new(options: &ModelToDomOptions) -> Self {
        ModelToDomContext::with_observer(options, None)
    }
}

impl<'a> ModelToDomContext<'a> {
    pub fn with_observer(
        options: &ModelToDomOptions,
        on_node_created: Option<&'a mut dyn FnMut(ModelNodeKind, &Handle)>,
    ) -> Self {
        Self {
            appliers: FormatAppliers::appliers(&options.applier_overrides),
            nodes: NodeStore::new(),
            reuse_cached_elements: options.reuse_cached_elements,
            merge_adjacent_text: options.merge_adjacent_text,
            implicit: ImplicitFormat::default(),
            list: ListWriteState::default(),
            selection: SelectionRecorder::default(),
            defaults_parser: DomToModelContext::new(&DomToModelOptions::default()),
            implied_cache: HashMap::new(),
            on_node_created,
        }
    }

    pub fn notify(&mut self, kind: ModelNodeKind, node: &Handle) {
        if let Some(callback) = self.on_node_created.as_deref_mut() {
            callback(kind, node);
        }
    }

    /// What a bare `tag` element implies for a format category, by parsing the tag defaults.
    pub fn implied(&mut self, tag: &str, category: FormatCategory) -> FormatMap {
        let key = (tag.to_string(), category);
        if let Some(format) = self.implied_cache.get(&key) {
            return format.clone();
        }

        let element = node::create_element(tag, vec![]);
        let mut format = FormatMap::new();
        self.defaults_parser.parsers.parse(
            category,
            &mut format,
            &element,
            &self.defaults_parser,
            &style::default_style(tag),
        );
        self.implied_cache.insert(key, format.clone());
        format
    }

    /// A cached element that may be reused for `tag`, when reuse is enabled.
    pub fn cached(&self, id: Option<NodeId>, tag: &str) -> Option<Handle> {
        if !self.reuse_cached_elements {
            return None;
        }
        let element = self.nodes.get(id?)?;
        node::is_tag(element, tag).then(|| element.clone())
    }

    /// Run `callback` with `implicit` as the implicit format, restoring the outer one after.
    pub fn with_implicit<R>(
        &mut self,
        implicit: ImplicitFormat,
        callback: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let outer = std::mem::replace(&mut self.implicit, implicit);
        let result = callback(self);
        self.implicit = outer;
        result
    }
}

/// Keys of `format` that the implied format does not already provide. A `false` flag with
/// nothing implied is the default and is dropped as well.
pub fn without_implied(format: &FormatMap, implied: &FormatMap) -> FormatMap {
    format
        .iter()
        .filter(|(key, value)| match implied.get(key) {
            Some(implied_value) => implied_value != *value,
            None => value.as_bool() != Some(false),
        })
        .map(|(key, value)| (key, value.clone()))
        .collect()
}

/// Only the keys a category handles.
pub fn only_category(format: &FormatMap, category: FormatCategory) -> FormatMap {
    let keys = category.keys();
    format
        .iter()
        .filter(|(key, _)| keys.contains(key))
        .map(|(key, value)| (key, value.clone()))
        .collect()
}
