//! Single-slot wrapper elements

use crate::ast::node::NodeId;
use serde::Serialize;

/// Square root over its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootNode {
    pub inner: NodeId,
}

/// Absolute value bars around the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbsNode {
    pub inner: NodeId,
}

/// Complex conjugate overline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConjugateNode {
    pub inner: NodeId,
}

/// Parenthesized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParenNode {
    pub inner: NodeId,
    /// When false, the parentheses are structural only and not drawn.
    /// Cleared when the source element carries any attribute.
    pub print_parens: bool,
}

impl ParenNode {
    pub fn new(inner: NodeId, print_parens: bool) -> Self {
        Self {
            inner,
            print_parens,
        }
    }
}
