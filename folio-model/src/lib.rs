//! Bidirectional conversion between an HTML markup tree and an editable content model
//!
//!     The markup tree is what the browser (or any host) renders; the content model is what
//!     editing code works on. This crate converts one into the other and back, so that a format
//!     change is applied to typed blocks and segments and then written back into the same tree
//!     with as little mutation as possible.
//!
//!     TLDR:
//!         - Parse with MarkupTree::parse_fragment, convert with dom_to_content_model.
//!         - Edit the ContentModelDocument (it is plain data, serde serializable).
//!         - Write it back with content_model_to_dom; untouched elements are reused.
//!         - Formats are flat key/value maps; every key has one parser and one applier.
//!
//! Architecture
//!
//!     Both directions share one format layer (./format/mod.rs): a table of format handlers,
//!     each owning a key (`bold`, `textAlign`, `marginTop`, ...) with a parse function (style
//!     → FormatMap) and an apply function (FormatMap → style). Handlers are grouped by
//!     category and the registries compose built-ins with per-call overrides.
//!
//!     This is a pure lib: it never reads the environment, never prints and never touches the
//!     file system. Shells (folio-cli) own those concerns.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── lib.rs
//!     ├── dom                       # Markup tree helpers, node store, selection shapes
//!     ├── model                     # The content model types and FormatMap
//!     ├── format
//!     │   ├── handlers              # One module per format family
//!     │   ├── registry.rs           # Composed parsers / appliers
//!     │   └── mod.rs                # Categories and the handler table
//!     ├── dom_to_model
//!     │   ├── processors            # Per tag processors (block, inline, list, table, ...)
//!     │   ├── stack.rs              # Scoped format context
//!     │   ├── selection.rs          # Live selection → markers
//!     │   └── measure.rs            # Pluggable box measurer
//!     ├── model_to_dom
//!     │   ├── handlers              # Per block / segment writers
//!     │   ├── context.rs            # Writer context, implied formats
//!     │   └── selection.rs          # Recorded positions → resolved selection
//!     └── normalize                 # Idempotent cleanup pass
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common
//!     ├── dom_to_model
//!     ├── model_to_dom
//!     ├── normalize
//!     └── roundtrip
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     The reader is a recursive walk with a scoped context: entering an element snapshots the
//!     segment, block and link formats, parses the element's own format on top, processes the
//!     children, then restores the snapshot (see ./dom_to_model/stack.rs). Tables are rebuilt
//!     as a dense grid where spanned positions hold placeholder cells; list items carry the
//!     full chain of list levels so nesting survives flattening.
//!
//!     The writer mirrors the reader and keeps a format inheritance context of its own, so a key
//!     is only written when nothing around the element already implies it. List numbering is
//!     threaded across interrupted lists with `start` attributes.
//!
//!     The normalizer makes the reader's output a fixed point: converting, writing and
//!     converting again yields the same model.

pub mod dom;
pub mod dom_to_model;
pub mod error;
pub mod format;
pub mod model;
pub mod model_to_dom;
pub mod normalize;

pub use dom::{DomSelection, MarkupTree, NodeId, NodeStore};
pub use dom_to_model::{dom_to_content_model, DomToModelOptions};
pub use error::ConversionError;
pub use model::{Block, ContentModelDocument, FormatMap, FormatValue, Segment};
pub use model_to_dom::{content_model_to_dom, ModelNodeKind, ModelToDomOptions, ResolvedSelection};
pub use normalize::{normalize_content_model, normalize_paragraph};

/// Parse `html` and convert it to a content model in one step.
///
/// The tree is returned too: the model's cached elements point into its node store.
pub fn html_to_model(
    html: &str,
    options: &DomToModelOptions,
) -> Result<(MarkupTree, ContentModelDocument), ConversionError> {
    let mut tree = MarkupTree::parse_fragment(html)?;
    let model = dom_to_content_model(&mut tree, options, None);
    Ok((tree, model))
}

