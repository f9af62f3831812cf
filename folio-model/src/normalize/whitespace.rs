//! Whitespace collapsing across the text segments of one paragraph.
//!
//! Each line (a run of segments between `Br`s) is treated as one stream of characters:
//!
//!     - a space run before anything visible on the line is dropped
//!     - a space run after which nothing visible follows on the line is dropped
//!     - a run right after a kept space is dropped, and the next run after such a drop
//!       becomes a single no-break space so the gap stays visible
//!     - any other run becomes a single space
//!
//! Selection markers are transparent; images, entities and other non-text segments count as
//! visible content.

use crate::model::Segment;

pub const NBSP: char = '\u{A0}';

/// White-space values that keep text as written.
const PRESERVING: [&str; 4] = ["pre", "pre-wrap", "pre-line", "break-spaces"];

pub fn preserves_whitespace(white_space: Option<&str>) -> bool {
    white_space.is_some_and(|value| PRESERVING.contains(&value.trim()))
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn has_visible_content(segment: &Segment) -> bool {
    match segment {
        Segment::Text(text) => text.text.chars().any(|c| !is_space(c)),
        Segment::SelectionMarker(_) => false,
        _ => true,
    }
}

#[derive(Default)]
struct LineState {
    // Nothing visible has been kept on this line yet.
    started: bool,
    // The last kept character is a space.
    after_space: bool,
    // A run was dropped since the last kept character.
    dropped: bool,
}

impl LineState {
    fn visible(&mut self) {
        self.started = true;
        self.after_space = false;
        self.dropped = false;
    }
}

pub fn collapse_whitespace(segments: &mut [Segment]) {
    let mut state = LineState::default();

    for index in 0..segments.len() {
        let line_continues = segments[index + 1..]
            .iter()
            .take_while(|s| !s.is_br())
            .any(has_visible_content);

        match &mut segments[index] {
            Segment::Br(_) => state = LineState::default(),
            Segment::SelectionMarker(_) => {}
            Segment::Text(text) => {
                text.text = collapse_text(&text.text, line_continues, &mut state);
            }
            _ => state.visible(),
        }
    }
}

fn collapse_text(text: &str, line_continues: bool, state: &mut LineState) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut index = 0;

    while index < chars.len() {
        if !is_space(chars[index]) {
            out.push(chars[index]);
            state.visible();
            index += 1;
            continue;
        }

        let run_end = chars[index..]
            .iter()
            .position(|c| !is_space(*c))
            .map_or(chars.len(), |offset| index + offset);
        let at_line_end = run_end == chars.len() && !line_continues;
        index = run_end;

        if at_line_end || !state.started {
            continue;
        }
        if state.dropped {
            out.push(NBSP);
            state.after_space = false;
            state.dropped = false;
        } else if state.after_space {
            state.dropped = true;
        } else {
            out.push(' ');
            state.after_space = true;
        }
    }

    out
}
