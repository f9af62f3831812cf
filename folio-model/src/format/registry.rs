//! Composition of built-in handlers with per-call overrides
//!
//! The built-in handler table is static and never modified. Each conversion composes its own
//! view of it:
//!
//!     1. built-in handlers of the category, in [`FormatCategory::keys`] order
//!     2. an override for a key replaces that entry at the same position, `None` removes it
//!     3. additional handlers for the category are appended after all built-ins
//!
//! The same rule composes parsers and appliers.

use super::{handler, FormatApplier, FormatCategory, FormatHandler, FormatParser};
use crate::dom::StyleMap;
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;
use std::collections::HashMap;

/// Caller customisation of one handler kind (parsers or appliers).
#[derive(Debug, Clone)]
pub struct FormatOverrides<F> {
    /// Replacement per built-in key; `None` disables the key.
    pub overrides: HashMap<String, Option<F>>,
    /// Extra handlers per category, run after the built-ins.
    pub additional: HashMap<FormatCategory, Vec<F>>,
}

impl<F> Default for FormatOverrides<F> {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            additional: HashMap::new(),
        }
    }
}

impl<F> FormatOverrides<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, key: &str, handler: Option<F>) -> Self {
        self.overrides.insert(key.to_string(), handler);
        self
    }

    pub fn with_additional(mut self, category: FormatCategory, handler: F) -> Self {
        self.additional.entry(category).or_default().push(handler);
        self
    }
}

/// One composed handler. Additional handlers carry no key.
#[derive(Debug, Clone)]
pub struct FormatEntry<F> {
    pub key: Option<&'static str>,
    pub handler: F,
}

/// The ordered handler list of every category for one conversion.
#[derive(Debug, Clone)]
pub struct ComposedFormats<F> {
    categories: HashMap<FormatCategory, Vec<FormatEntry<F>>>,
}

impl<F: Copy> ComposedFormats<F> {
    /// Compose the built-ins (projected through `select`) with the caller's overrides.
    pub fn compose(select: fn(&FormatHandler) -> F, overrides: &FormatOverrides<F>) -> Self {
        let mut categories = HashMap::new();

        for category in FormatCategory::ALL {
            let mut entries = Vec::new();

            for key in category.keys() {
                let chosen = match overrides.overrides.get(*key) {
                    Some(replacement) => *replacement,
                    None => handler(key).map(select),
                };
                if let Some(f) = chosen {
                    entries.push(FormatEntry {
                        key: Some(*key),
                        handler: f,
                    });
                }
            }

            if let Some(extra) = overrides.additional.get(&category) {
                entries.extend(extra.iter().map(|f| FormatEntry {
                    key: None,
                    handler: *f,
                }));
            }

            categories.insert(category, entries);
        }

        Self { categories }
    }

    pub fn entries(&self, category: FormatCategory) -> &[FormatEntry<F>] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Keys in execution order, `None` marking additional handlers.
    pub fn keys(&self, category: FormatCategory) -> Vec<Option<&'static str>> {
        self.entries(category).iter().map(|e| e.key).collect()
    }
}

pub type FormatParsers = ComposedFormats<FormatParser>;
pub type FormatAppliers = ComposedFormats<FormatApplier>;

impl ComposedFormats<FormatParser> {
    pub fn parsers(overrides: &FormatOverrides<FormatParser>) -> Self {
        Self::compose(|h| h.parse, overrides)
    }

    /// Run every parser of a category over `element`.
    pub fn parse(
        &self,
        category: FormatCategory,
        format: &mut FormatMap,
        element: &Handle,
        context: &DomToModelContext,
        default_style: &StyleMap,
    ) {
        for entry in self.entries(category) {
            (entry.handler)(format, element, context, default_style);
        }
    }
}

impl ComposedFormats<FormatApplier> {
    pub fn appliers(overrides: &FormatOverrides<FormatApplier>) -> Self {
        Self::compose(|h| h.apply, overrides)
    }

    /// Run every applier of a category onto `element`.
    pub fn apply(
        &self,
        category: FormatCategory,
        format: &FormatMap,
        element: &Handle,
        context: &ModelToDomContext<'_>,
    ) {
        for entry in self.entries(category) {
            (entry.handler)(format, element, context);
        }
    }
}

impl Default for ComposedFormats<FormatParser> {
    fn default() -> Self {
        Self::parsers(&FormatOverrides::default())
    }
}

impl Default for ComposedFormats<FormatApplier> {
    fn default() -> Self {
        Self::appliers(&FormatOverrides::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_bold(format: &mut FormatMap, _: &Handle, _: &DomToModelContext, _: &StyleMap) {
        format.set("bold", "custom");
    }

    fn extra_block(format: &mut FormatMap, _: &Handle, _: &DomToModelContext, _: &StyleMap) {
        format.set("extra", true);
    }

    #[test]
    fn default_composition_follows_category_order() {
        let parsers = FormatParsers::default();
        let keys: Vec<_> = parsers
            .keys(FormatCategory::Segment)
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(keys, FormatCategory::Segment.keys());
    }

    #[test]
    fn override_replaces_in_place_and_additional_runs_last() {
        let overrides = FormatOverrides::new()
            .with_override("bold", Some(custom_bold as FormatParser))
            .with_additional(FormatCategory::Block, extra_block as FormatParser);
        let parsers = FormatParsers::parsers(&overrides);

        let segment_keys = parsers.keys(FormatCategory::Segment);
        let bold_position = FormatCategory::Segment
            .keys()
            .iter()
            .position(|k| *k == "bold")
            .unwrap();
        assert_eq!(segment_keys[bold_position], Some("bold"));
        assert_eq!(segment_keys.len(), FormatCategory::Segment.keys().len());

        let block_keys = parsers.keys(FormatCategory::Block);
        assert_eq!(block_keys.len(), FormatCategory::Block.keys().len() + 1);
        assert_eq!(block_keys.last(), Some(&None));
        assert!(block_keys[..block_keys.len() - 1].iter().all(Option::is_some));
    }

    #[test]
    fn none_override_removes_the_key() {
        let overrides: FormatOverrides<FormatParser> =
            FormatOverrides::new().with_override("margin", None);
        let parsers = FormatParsers::parsers(&overrides);
        assert!(!parsers
            .keys(FormatCategory::Block)
            .contains(&Some("margin")));
        assert!(parsers.keys(FormatCategory::Block).contains(&Some("padding")));
    }

    #[test]
    fn appliers_compose_with_the_same_rule() {
        fn noop(_: &FormatMap, _: &Handle, _: &ModelToDomContext<'_>) {}
        let overrides = FormatOverrides::new()
            .with_override("textColor", Some(noop as FormatApplier))
            .with_additional(FormatCategory::Segment, noop as FormatApplier);
        let appliers = FormatAppliers::appliers(&overrides);
        let keys = appliers.keys(FormatCategory::Segment);
        assert_eq!(keys.len(), FormatCategory::Segment.keys().len() + 1);
        assert_eq!(keys[5], Some("textColor"));
        assert_eq!(keys.last(), Some(&None));
    }
}
