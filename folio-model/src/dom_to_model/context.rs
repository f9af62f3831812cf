//! State threaded through one tree → model conversion.

use super::measure::{BoxMeasurer, StyleBoxMeasurer};
use super::processors::{self, ElementProcessor};
use super::DomToModelOptions;
use crate::dom::{DomSelection, ImageSelection, NodeId, NodeStore, RangeSelection, TableSelection};
use crate::format::FormatParsers;
use crate::model::{Code, FormatMap, Link, ListItem, ListLevel, ParagraphDecorator};
use markup5ever_rcdom::Handle;
use std::collections::HashMap;
use std::rc::Rc;

/// List state while descending nested lists.
#[derive(Debug, Clone, Default)]
pub struct ListContext {
    /// One entry per open list, outermost first.
    pub levels: Vec<ListLevel>,
    /// Items seen so far in the current ordered-list thread, per depth.
    pub thread_counts: Vec<u32>,
    /// List items in document order, filled in as each `<li>` completes. Nested lists add
    /// their items here too, so the whole list lands flat in the outermost owner group.
    pub(crate) staged: Vec<Option<ListItem>>,
    pub(crate) open_items: usize,
}

/// The mutable environment of a conversion: selection state, ambient formats and settings.
pub struct DomToModelContext {
    // selection
    pub is_in_selection: bool,
    pub range: Option<RangeSelection>,
    pub table_selection: Option<TableSelection>,
    pub image_selection: Option<ImageSelection>,

    // ambient formats, scoped through `stack_format`
    pub block_format: FormatMap,
    pub segment_format: FormatMap,
    pub link: Link,
    pub code: Code,
    pub block_decorator: Option<ParagraphDecorator>,
    pub list: ListContext,

    // settings
    pub processors: HashMap<String, ElementProcessor>,
    pub parsers: FormatParsers,
    pub allow_cache_element: bool,
    pub measurer: Rc<dyn BoxMeasurer>,
    pub nodes: NodeStore,
}

impl DomToModelContext {
    pub fn new(options: &DomToModelOptions) -> Self {
        let mut processors = processors::default_processors();
        for (tag, processor) in &options.processor_overrides {
            processors.insert(tag.clone(), *processor);
        }

        Self {
            is_in_selection: false,
            range: None,
            table_selection: None,
            image_selection: None,
            block_format: FormatMap::new(),
            segment_format: options.default_format.clone(),
            link: Link::default(),
            code: Code::default(),
            block_decorator: None,
            list: ListContext::default(),
            processors,
            parsers: FormatParsers::parsers(&options.parser_overrides),
            allow_cache_element: options.allow_cache_element,
            measurer: options
                .measurer
                .clone()
                .unwrap_or_else(|| Rc::new(StyleBoxMeasurer)),
            nodes: NodeStore::new(),
        }
    }

    pub fn set_selection(&mut self, selection: &DomSelection) {
        match selection {
            DomSelection::Range(range) => self.range = Some(range.clone()),
            DomSelection::Table(table) => self.table_selection = Some(table.clone()),
            DomSelection::Image(image) => self.image_selection = Some(image.clone()),
        }
    }

    /// Register an element as a cached back reference when caching is enabled.
    pub fn cache(&mut self, element: &Handle) -> Option<NodeId> {
        self.allow_cache_element
            .then(|| self.nodes.register(element))
    }

    pub fn processor(&self, key: &str) -> Option<ElementProcessor> {
        self.processors.get(key).copied()
    }

    /// Whether the ambient block format keeps whitespace literally.
    pub fn preserves_whitespace(&self) -> bool {
        crate::normalize::preserves_whitespace(self.block_format.get_str("whiteSpace"))
    }
}
