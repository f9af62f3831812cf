//! Reading what was written gives back the same model.

use crate::common::{detached_model, write_fresh};

const DOCUMENTS: [&str; 7] = [
    "plain <b>bold</b> and <i>italic</i>",
    "<h2>Heading</h2><p>Body with <a href=\"https://example.com\">a link</a>.</p>",
    "<div style=\"text-align: center\">centered <span style=\"color: red\">red</span></div>",
    "<blockquote>quoted</blockquote><hr><div>after</div>",
    "<ul><li>one</li><li>two</li></ul>",
    "<table><tr><td colspan=\"2\">a</td></tr><tr><td>b</td><td>c</td></tr></table>",
    "<div>a<br><br></div><code>x</code>",
];

#[test]
fn written_documents_read_back_unchanged() {
    for html in DOCUMENTS {
        let model = detached_model(html);
        // writing records the new elements on the model
        let written = write_fresh(&mut model.clone());
        let again = detached_model(&written);
        assert_eq!(model, again, "{html} was written as {written}");
    }
}

#[test]
fn second_write_matches_the_first() {
    for html in DOCUMENTS {
        let mut model = detached_model(html);
        let first = write_fresh(&mut model);
        let mut again = detached_model(&first);
        assert_eq!(write_fresh(&mut again), first, "{html}");
    }
}
