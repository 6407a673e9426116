//! # mathdoc
//!
//! A parser for the mathdoc markup format: persisted mathematical
//! documents become an in-memory presentation tree ready for a layout and
//! rendering pass.
//!
//! The pipeline is markup text → [`markup::MarkupNode`] element tree →
//! [`parsing::Parser`] → [`ast::NodeTree`] chains of [`ast::Node`]s.
//! Groups bundle editable source with computed outputs and can fold; the
//! tree keeps both the content-order and the draw-order linkage an
//! external layout pass works with.
//!
//! ## Robustness
//!
//! Input is untrusted. Composite tags missing required children are
//! dropped, unknown tags degrade to their children or to nothing (with one
//! warning per parse), control characters are replaced, and documents over
//! the configured length ceiling become a single placeholder node instead
//! of being parsed.

pub mod ast;
pub mod config;
pub mod markup;
pub mod parsing;

pub use ast::{Category, Node, NodeId, NodeKind, NodeTree, TextStyle};
pub use config::{InputCeiling, ParserConfig};
pub use markup::{MarkupElement, MarkupError, MarkupNode};
pub use parsing::{AssetResolver, ParseOutcome, ParseWarning, Parser};
