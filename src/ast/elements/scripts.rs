//! Script elements: powers, subscripts and indexed access

use crate::ast::node::NodeId;
use serde::Serialize;

/// Base raised to an exponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowerNode {
    pub base: NodeId,
    pub exponent: NodeId,
    /// Set when the source element carried attributes; the exponent then
    /// follows the matrix-power convention when rendered.
    pub matrix_convention: bool,
}

impl PowerNode {
    pub fn new(base: NodeId, exponent: NodeId, matrix_convention: bool) -> Self {
        Self {
            base,
            exponent,
            matrix_convention,
        }
    }
}

/// Base with a lowered index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptNode {
    pub base: NodeId,
    pub index: NodeId,
}

impl SubscriptNode {
    pub fn new(base: NodeId, index: NodeId) -> Self {
        Self { base, index }
    }
}

/// Base with both a lowered index and a raised exponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubSupNode {
    pub base: NodeId,
    pub index: NodeId,
    pub exponent: NodeId,
}

impl SubSupNode {
    pub fn new(base: NodeId, index: NodeId, exponent: NodeId) -> Self {
        Self {
            base,
            index,
            exponent,
        }
    }
}

/// Indexed access: an expression evaluated at a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtNode {
    pub base: NodeId,
    pub index: NodeId,
}

impl AtNode {
    pub fn new(base: NodeId, index: NodeId) -> Self {
        Self { base, index }
    }
}
