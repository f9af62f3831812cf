//! Text nodes.

use crate::dom::node;
use crate::dom_to_model::context::DomToModelContext;
use crate::dom_to_model::helpers::{add_decorators, add_segment, add_selection_marker};
use crate::dom_to_model::selection::text_selection_offsets;
use crate::model::{Block, BlockGroup, Segment, Text};
use markup5ever_rcdom::Handle;

/// Split a text node at the range endpoints that fall inside it and add the pieces.
pub fn text_processor(
    group: &mut dyn BlockGroup,
    text_node: &Handle,
    context: &mut DomToModelContext,
) {
    let chars: Vec<char> = node::text_of(text_node).unwrap_or_default().chars().collect();
    let (start, end) = text_selection_offsets(context, text_node, chars.len());
    let collapsed = context.range.as_ref().is_some_and(|r| r.is_collapsed);
    let mut cursor = 0;

    if let Some(start) = start {
        add_text_segment(group, &slice(&chars, cursor, start), context);
        cursor = start;
        context.is_in_selection = true;
        add_selection_marker(group, context);
    }

    if let Some(end) = end {
        let end = end.max(cursor);
        add_text_segment(group, &slice(&chars, cursor, end), context);
        cursor = end;
        if !collapsed {
            add_selection_marker(group, context);
        }
        context.is_in_selection = false;
    }

    add_text_segment(group, &slice(&chars, cursor, chars.len()), context);
}

fn slice(chars: &[char], from: usize, to: usize) -> String {
    chars[from.min(to)..to].iter().collect()
}

fn is_collapsible(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Add a run of text, merging it into the previous text segment when nothing but the text
/// differs. Whitespace-only runs before any content of the paragraph are dropped unless the
/// block preserves whitespace.
fn add_text_segment(group: &mut dyn BlockGroup, text: &str, context: &DomToModelContext) {
    if text.is_empty() {
        return;
    }

    if text.chars().all(is_collapsible) && !context.preserves_whitespace() {
        let has_content = matches!(
            group.blocks().last(),
            Some(Block::Paragraph(paragraph)) if !paragraph.segments.is_empty()
        );
        if !has_content {
            return;
        }
    }

    let mut segment = Segment::Text(Text {
        text: text.to_string(),
        format: context.segment_format.clone(),
        is_selected: context.is_in_selection,
        ..Text::default()
    });
    add_decorators(&mut segment, context);

    if let (Some(Block::Paragraph(paragraph)), Segment::Text(new)) =
        (group.blocks_mut().last_mut(), &segment)
    {
        if let Some(Segment::Text(last)) = paragraph.segments.last_mut() {
            if last.format == new.format
                && last.is_selected == new.is_selected
                && last.link == new.link
                && last.code == new.code
            {
                last.text.push_str(&new.text);
                return;
            }
        }
    }

    add_segment(group, segment, &context.block_format);
}

#[cfg(test)]
mod tests {
    use crate::dom::{tree, DomPoint, DomSelection, MarkupTree, RangeSelection};
    use crate::dom_to_model::{dom_to_content_model, DomToModelOptions};
    use crate::model::Segment;

    fn raw_options() -> DomToModelOptions {
        DomToModelOptions {
            normalize: false,
            ..DomToModelOptions::default()
        }
    }

    #[test]
    fn adjacent_text_with_same_format_merges() {
        let mut tree = MarkupTree::parse_fragment("a<span>b</span>").unwrap();
        let model = dom_to_content_model(&mut tree, &raw_options(), None);
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        assert_eq!(paragraph.segments.len(), 1);
        assert_eq!(paragraph.segments[0].as_text().unwrap().text, "ab");
    }

    #[test]
    fn leading_whitespace_only_text_is_dropped() {
        let mut tree = MarkupTree::parse_fragment("<div>\n  <b>a</b> <i>b</i></div>").unwrap();
        let model = dom_to_content_model(&mut tree, &raw_options(), None);
        let paragraph = model.blocks[0].as_paragraph().unwrap();
        let texts: Vec<&str> = paragraph
            .segments
            .iter()
            .filter_map(|s| s.as_text().map(|t| t.text.as_str()))
            .collect();
        assert_eq!(texts, vec!["a", " ", "b"]);
    }

    #[test]
    fn range_inside_text_marks_the_selected_run() {
        let mut tree = MarkupTree::parse_fragment("abcd").unwrap();
        let text = tree::first_child(tree.root()).unwrap();
        let selection = DomSelection::Range(RangeSelection::new(
            DomPoint::new(text.clone(), 1),
            DomPoint::new(text, 3),
        ));
        let model = dom_to_content_model(&mut tree, &raw_options(), Some(&selection));
        let segments = &model.blocks[0].as_paragraph().unwrap().segments;
        let shape: Vec<(String, bool)> = segments
            .iter()
            .map(|s| match s {
                Segment::Text(t) => (t.text.clone(), t.is_selected),
                Segment::SelectionMarker(_) => ("|".to_string(), true),
                _ => ("?".to_string(), false),
            })
            .collect();
        assert_eq!(
            shape,
            vec![
                ("a".to_string(), false),
                ("bc".to_string(), true),
                ("d".to_string(), false),
            ]
        );
    }

    #[test]
    fn caret_inside_text_adds_one_marker() {
        let mut tree = MarkupTree::parse_fragment("abc").unwrap();
        let text = tree::first_child(tree.root()).unwrap();
        let selection = DomSelection::Range(RangeSelection::caret(DomPoint::new(text, 2)));
        let model = dom_to_content_model(&mut tree, &raw_options(), Some(&selection));
        let segments = &model.blocks[0].as_paragraph().unwrap().segments;
        assert_eq!(segments.len(), 3);
        assert!(segments[1].is_marker());
        assert_eq!(segments[0].as_text().unwrap().text, "ab");
        assert!(!segments[2].is_selected());
    }
}
