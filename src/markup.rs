//! Markup input model
//!
//! The parser consumes a tree of [`MarkupNode`]s: elements with a tag name,
//! ordered attributes and children, or raw text runs. The [`reader`] module
//! turns persisted markup text into that tree; callers that already hold an
//! element tree can hand it to the parser directly.

pub mod node;
pub mod reader;

pub use node::{MarkupElement, MarkupNode};
pub use reader::{read_document, MarkupError};
