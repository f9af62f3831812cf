//! Parser composition as seen from a full conversion.

use crate::common::convert_with;
use folio_model::dom::StyleMap;
use folio_model::dom_to_model::DomToModelContext;
use folio_model::format::{FormatCategory, FormatOverrides, FormatParser};
use folio_model::{DomToModelOptions, FormatMap};
use markup5ever_rcdom::Handle;

fn remember_bold(format: &mut FormatMap, _: &Handle, _: &DomToModelContext, _: &StyleMap) {
    let bold = format.flag("bold");
    format.set("sawBold", bold);
}

fn never_bold(_: &mut FormatMap, _: &Handle, _: &DomToModelContext, _: &StyleMap) {}

fn first_segment_format(html: &str, options: &DomToModelOptions) -> FormatMap {
    let (_, model) = convert_with(html, options, None);
    model.blocks[0].as_paragraph().unwrap().segments[0]
        .format()
        .clone()
}

#[test]
fn additional_parsers_run_after_the_builtins() {
    let options = DomToModelOptions {
        parser_overrides: FormatOverrides::new()
            .with_additional(FormatCategory::Segment, remember_bold as FormatParser),
        ..DomToModelOptions::default()
    };
    let format = first_segment_format("<b>x</b>", &options);
    assert_eq!(format.get_bool("sawBold"), Some(true));
}

#[test]
fn replaced_parser_takes_the_builtin_slot() {
    let options = DomToModelOptions {
        parser_overrides: FormatOverrides::new()
            .with_override("bold", Some(never_bold as FormatParser))
            .with_additional(FormatCategory::Segment, remember_bold as FormatParser),
        ..DomToModelOptions::default()
    };
    let format = first_segment_format("<b>x</b><i>y</i>", &options);
    assert!(!format.contains("bold"));
    assert_eq!(format.get_bool("sawBold"), Some(false));
}

#[test]
fn disabled_parser_drops_its_key_only() {
    let options = DomToModelOptions {
        parser_overrides: FormatOverrides::new().with_override("italic", None),
        ..DomToModelOptions::default()
    };
    let format = first_segment_format("<b><i>x</i></b>", &options);
    assert!(format.flag("bold"));
    assert!(!format.contains("italic"));
}

#[test]
fn default_format_seeds_every_segment() {
    let mut default_format = FormatMap::new();
    default_format.set("fontFamily", "serif");
    let options = DomToModelOptions {
        default_format,
        ..DomToModelOptions::default()
    };
    let (_, model) = convert_with("a<b>b</b>", &options, None);
    let paragraph = model.blocks[0].as_paragraph().unwrap();
    assert!(paragraph
        .segments
        .iter()
        .all(|segment| segment.format().get_str("fontFamily") == Some("serif")));
}
