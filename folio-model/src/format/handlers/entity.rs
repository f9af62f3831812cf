//! Entity identity carried in class names: `_Entity _EType_<type> _EId_<id> _EReadonly_1`.

use crate::dom::{node, StyleMap};
use crate::dom_to_model::DomToModelContext;
use crate::model::FormatMap;
use crate::model_to_dom::ModelToDomContext;
use markup5ever_rcdom::Handle;

pub const ENTITY_CLASS: &str = "_Entity";
const TYPE_PREFIX: &str = "_EType_";
const ID_PREFIX: &str = "_EId_";
const READONLY_PREFIX: &str = "_EReadonly_";

pub fn parse_entity(format: &mut FormatMap, element: &Handle, _: &DomToModelContext, _: &StyleMap) {
    for class in node::class_list(element) {
        if let Some(entity_type) = class.strip_prefix(TYPE_PREFIX) {
            format.set("entityType", entity_type);
        } else if let Some(id) = class.strip_prefix(ID_PREFIX) {
            format.set("id", id);
        } else if let Some(flag) = class.strip_prefix(READONLY_PREFIX) {
            format.set("isReadonly", flag == "1");
        }
    }
    if node::get_attribute(element, "contenteditable").as_deref() == Some("false") {
        format.set("isReadonly", true);
    }
}

pub fn apply_entity(format: &FormatMap, element: &Handle, _: &ModelToDomContext<'_>) {
    let classes = entity_classes(
        format.get_str("entityType"),
        format.get_str("id"),
        format.flag("isReadonly"),
    );
    let mut kept: Vec<String> = node::class_list(element)
        .into_iter()
        .filter(|c| {
            c != ENTITY_CLASS
                && !c.starts_with(TYPE_PREFIX)
                && !c.starts_with(ID_PREFIX)
                && !c.starts_with(READONLY_PREFIX)
        })
        .collect();
    kept.push(classes);
    node::set_attribute(element, "class", &kept.join(" "));
    if format.flag("isReadonly") {
        node::set_attribute(element, "contenteditable", "false");
    }
}

pub fn entity_classes(entity_type: Option<&str>, id: Option<&str>, readonly: bool) -> String {
    let mut classes = vec![ENTITY_CLASS.to_string()];
    if let Some(entity_type) = entity_type {
        classes.push(format!("{TYPE_PREFIX}{entity_type}"));
    }
    if let Some(id) = id {
        classes.push(format!("{ID_PREFIX}{id}"));
    }
    classes.push(format!("{READONLY_PREFIX}{}", if readonly { 1 } else { 0 }));
    classes.join(" ")
}
