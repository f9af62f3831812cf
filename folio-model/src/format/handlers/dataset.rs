use crate::dom::{node, StyleMap};
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;

/// `data-*` attributes keyed by the part after `data-`.
pub fn read_dataset(element: &Handle) -> FormatMap {
    node::attributes(element)
        .into_iter()
        .filter_map(|(name, value)| {
            name.strip_prefix("data-")
                .filter(|key| !key.is_empty())
                .map(|key| (key.to_string(), value))
        })
        .collect()
}

pub fn write_dataset(dataset: &FormatMap, element: &Handle) {
    for (key, value) in dataset.iter() {
        if let Some(text) = value.as_str() {
            node::set_attribute(element, &format!("data-{key}"), text);
        }
    }
}

pub fn parse_dataset(
    format: &mut FormatMap,
    element: &Handle,
    _: &DomToModelContext,
    _: &StyleMap,
) {
    format.extend_from(&read_dataset(element));
}

pub fn apply_dataset(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    write_dataset(format, element);
}
