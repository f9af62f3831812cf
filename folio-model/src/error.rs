//! Error types for markup and model operations
//!
//! Conversion between the markup tree and the content model is total: unknown markup degrades
//! to general wrappers and malformed metadata is dropped. The only failures that reach callers
//! come from reading or writing serialized markup and from stale node handles.

use thiserror::Error;

/// Errors that can occur around a conversion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The markup could not be read into a tree
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The tree could not be written back to markup
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// A model handle does not point into this tree's node store
    #[error("Unknown node handle #{0}")]
    UnknownNode(u32),
}
