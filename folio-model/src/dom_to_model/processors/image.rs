use crate::dom::{node, style};
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::helpers::{add_decorators, add_segment};
use crate::dom_to_model::selection::is_image_selected;
use crate::format::FormatCategory;
use crate::model::{BlockGroup, FormatMap, Image, Segment};
use markup5ever_rcdom::Handle;

pub fn image_processor(
    group: &mut dyn BlockGroup,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let defaults = style::default_style("img");
    let mut format = context.segment_format.clone();
    context
        .parsers
        .parse(FormatCategory::Image, &mut format, element, context, &defaults);
    let mut dataset = FormatMap::new();
    context
        .parsers
        .parse(FormatCategory::Dataset, &mut dataset, element, context, &defaults);

    let mut image = Image {
        src: node::get_attribute(element, "src").unwrap_or_default(),
        alt: node::get_attribute(element, "alt"),
        title: node::get_attribute(element, "title"),
        format,
        dataset,
        is_selected: context.is_in_selection,
        ..Image::default()
    };
    if is_image_selected(context, element) {
        image.is_selected = true;
        image.is_selected_as_image_selection = true;
    }

    let mut segment = Segment::Image(image);
    add_decorators(&mut segment, context);
    add_segment(group, segment, &context.block_format);
}
