//! Normalization of converted documents.

use crate::common::{convert, paragraph_shape};
use folio_model::normalize_content_model;

const DOCUMENTS: [&str; 5] = [
    "<div> a <b> </b> b </div>",
    "<p>one<br>two<br></p><p>  </p>",
    "<ul><li> x </li><li></li></ul><blockquote> </blockquote>",
    "<table><tr><td> a  b </td><td></td></tr></table>",
    "<pre>  keep   this </pre>",
];

#[test]
fn whitespace_split_across_formats_collapses_once() {
    let (_, model) = convert("<div> a <b> </b> b </div>");
    assert_eq!(paragraph_shape(&model), vec!["a ", "\u{A0}b"]);
}

#[test]
fn single_trailing_break_is_dropped() {
    let (_, model) = convert("<div>a<br></div>");
    assert_eq!(paragraph_shape(&model), vec!["a"]);

    let (_, model) = convert("<div>a<br><br></div>");
    assert_eq!(paragraph_shape(&model), vec!["a", "<br>", "<br>"]);

    let (_, model) = convert("<div><br></div>");
    assert_eq!(paragraph_shape(&model), vec!["<br>"]);
}

#[test]
fn converted_documents_are_already_normal() {
    for html in DOCUMENTS {
        let (_, model) = convert(html);
        let mut again = model.clone();
        normalize_content_model(&mut again);
        assert_eq!(model, again, "{html}");
    }
}

#[test]
fn empty_blocks_do_not_survive() {
    let (_, model) = convert("<div> </div><blockquote></blockquote><p>x</p>");
    assert_eq!(model.blocks.len(), 1);
    assert_eq!(paragraph_shape(&model), vec!["x"]);
}
