//! Writing models into markup.

use crate::common::{detached_model, write_fresh};
use folio_model::{content_model_to_dom, MarkupTree, ModelNodeKind, ModelToDomOptions};

#[test]
fn tags_imply_their_own_formats() {
    let mut model = detached_model("<h1>Title</h1><p>Body <b>bold</b></p>");
    insta::assert_snapshot!(
        write_fresh(&mut model),
        @r#"<h1>Title</h1><p>Body <span style="font-weight: bold">bold</span></p>"#
    );
}

#[test]
fn links_keep_href_and_dataset() {
    let mut model = detached_model("<a href=\"https://example.com\" data-id=\"7\">x</a>");
    insta::assert_snapshot!(
        write_fresh(&mut model),
        @r#"<a href="https://example.com" data-id="7">x</a>"#
    );
}

#[test]
fn spanned_cells_are_written_once() {
    let mut model = detached_model(
        "<table><tr><td colspan=\"2\">a</td></tr><tr><td>b</td><td>c</td></tr></table>",
    );
    let html = write_fresh(&mut model);
    assert!(html.contains(r#"<td colspan="2">a</td>"#), "{html}");
    assert_eq!(html.matches("<td").count(), 3, "{html}");
}

#[test]
fn every_written_cell_is_reported() {
    let mut model = detached_model(
        "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>",
    );
    let mut tree = MarkupTree::parse_fragment("").unwrap();
    let mut kinds = Vec::new();
    let mut record = |kind: ModelNodeKind, _: &markup5ever_rcdom::Handle| kinds.push(kind);
    content_model_to_dom(
        &mut tree,
        &mut model,
        &ModelToDomOptions::default(),
        Some(&mut record),
    );

    let count = |wanted: ModelNodeKind| kinds.iter().filter(|kind| **kind == wanted).count();
    assert_eq!(count(ModelNodeKind::Table), 1);
    assert_eq!(count(ModelNodeKind::TableCell), 4);
    assert_eq!(count(ModelNodeKind::Text), 4);
}

#[test]
fn plain_text_is_not_merged_when_disabled() {
    let mut model = detached_model("a<span>b</span>");
    let mut tree = MarkupTree::parse_fragment("").unwrap();
    let options = ModelToDomOptions {
        merge_adjacent_text: false,
        ..ModelToDomOptions::default()
    };
    content_model_to_dom(&mut tree, &mut model, &options, None);
    // the reader already merged both runs into one segment
    assert_eq!(folio_model::dom::tree::child_count(tree.root()), 1);
    assert_eq!(tree.inner_html().unwrap(), "ab");
}
