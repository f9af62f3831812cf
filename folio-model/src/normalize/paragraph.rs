use super::whitespace::{collapse_whitespace, preserves_whitespace};
use crate::model::{Paragraph, Segment};

/// Clean up one paragraph. Running it twice changes nothing further.
///
/// Order matters: whitespace collapsing may empty text segments, empty segments go before the
/// line break rules look at the tail, and marker links are settled against the final
/// neighbours.
pub fn normalize_paragraph(paragraph: &mut Paragraph) {
    if !preserves_whitespace(paragraph.format.get_str("whiteSpace")) {
        collapse_whitespace(&mut paragraph.segments);
    }
    remove_empty_segments(&mut paragraph.segments);
    if !paragraph.is_implicit {
        normalize_tail(&mut paragraph.segments);
    }
    settle_marker_links(&mut paragraph.segments);
}

fn remove_empty_segments(segments: &mut Vec<Segment>) {
    segments.retain(|segment| !matches!(segment, Segment::Text(text) if text.text.is_empty()));
}

/// A caret alone on the last line needs a `Br` to have a line to sit on; a single `Br` after
/// content adds nothing.
fn normalize_tail(segments: &mut Vec<Segment>) {
    let count = segments.len();
    let last_is_marker = segments.last().is_some_and(Segment::is_marker);

    if last_is_marker && (count == 1 || segments[count - 2].is_br()) {
        let format = segments[count - 1].format().clone();
        segments.push(Segment::br(format));
        return;
    }

    if count > 1 && segments[count - 1].is_br() {
        let mut content = segments.iter().rev().filter(|s| !s.is_marker()).skip(1);
        if content.next().is_some_and(|before| !before.is_br()) {
            segments.pop();
        }
    }
}

/// A marker only keeps its link when the link continues on both sides of it.
fn settle_marker_links(segments: &mut [Segment]) {
    for index in 0..segments.len() {
        if !segments[index].is_marker() || segments[index].link().is_none() {
            continue;
        }

        let link = segments[index].link();
        let before = segments[..index].iter().rev().find(|s| !s.is_marker());
        let after = segments[index + 1..].iter().find(|s| !s.is_marker());
        let inside = matches!(
            (before, after),
            (Some(b), Some(a)) if b.link() == link && a.link() == link
        );

        if !inside {
            *segments[index].link_mut() = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormatMap, Link};

    fn text(value: &str) -> Segment {
        Segment::text(value, FormatMap::new())
    }

    fn br() -> Segment {
        Segment::br(FormatMap::new())
    }

    fn marker() -> Segment {
        Segment::marker(FormatMap::new())
    }

    fn explicit(segments: Vec<Segment>) -> Paragraph {
        let mut paragraph = Paragraph::new(false, FormatMap::new());
        paragraph.segments = segments;
        paragraph
    }

    fn linked(mut segment: Segment) -> Segment {
        let mut link = Link::default();
        link.format.set("href", "https://example.com");
        *segment.link_mut() = Some(link);
        segment
    }

    #[test]
    fn whitespace_regression_drops_the_emptied_segment() {
        let mut paragraph = Paragraph::new(true, FormatMap::new());
        paragraph.segments = vec![text(" a "), text(" "), text(" b ")];
        normalize_paragraph(&mut paragraph);
        let texts: Vec<_> = paragraph
            .segments
            .iter()
            .filter_map(Segment::as_text)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, vec!["a ", "\u{A0}b"]);
    }

    #[test]
    fn caret_on_an_empty_line_gets_a_break() {
        let mut paragraph = explicit(vec![marker()]);
        normalize_paragraph(&mut paragraph);
        assert_eq!(paragraph.segments, vec![marker(), br()]);

        let mut paragraph = explicit(vec![text("a"), br(), marker()]);
        normalize_paragraph(&mut paragraph);
        assert_eq!(paragraph.segments.len(), 4);
        assert!(paragraph.segments[3].is_br());
    }

    #[test]
    fn trailing_break_after_content_is_dropped() {
        let mut paragraph = explicit(vec![text("a"), marker(), br()]);
        normalize_paragraph(&mut paragraph);
        assert_eq!(paragraph.segments, vec![text("a"), marker()]);
    }

    #[test]
    fn double_trailing_break_is_kept() {
        let mut paragraph = explicit(vec![text("a"), br(), br()]);
        normalize_paragraph(&mut paragraph);
        assert_eq!(paragraph.segments.len(), 3);
    }

    #[test]
    fn implicit_paragraphs_keep_their_tail() {
        let mut paragraph = Paragraph::new(true, FormatMap::new());
        paragraph.segments = vec![text("a"), br()];
        normalize_paragraph(&mut paragraph);
        assert_eq!(paragraph.segments.len(), 2);
    }

    #[test]
    fn preserved_whitespace_is_untouched() {
        let mut paragraph = explicit(vec![text("  a  ")]);
        paragraph.format.set("whiteSpace", "pre");
        normalize_paragraph(&mut paragraph);
        assert_eq!(paragraph.segments[0].as_text().unwrap().text, "  a  ");
    }

    #[test]
    fn marker_inside_a_link_keeps_it() {
        let mut paragraph = explicit(vec![linked(text("a")), linked(marker()), linked(text("b"))]);
        normalize_paragraph(&mut paragraph);
        assert!(paragraph.segments[1].link().is_some());
    }

    #[test]
    fn marker_at_the_edge_of_a_link_drops_it() {
        let mut paragraph = explicit(vec![linked(text("a")), linked(marker()), text("b")]);
        normalize_paragraph(&mut paragraph);
        assert!(paragraph.segments[1].link().is_none());
        assert!(paragraph.segments[0].link().is_some());
    }
}
