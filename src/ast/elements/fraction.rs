//! Fractions and differentials

use crate::ast::node::NodeId;
use serde::Serialize;

/// Presentation sub-style of a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FractionStyle {
    /// Numerator over denominator with a dividing line.
    #[default]
    Normal,
    /// No dividing line (binomial-coefficient presentation).
    NoLine,
    /// Derivative presentation (d/dx).
    Derivative,
}

/// Numerator over denominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FractionNode {
    pub num: NodeId,
    pub denom: NodeId,
    pub style: FractionStyle,
}

impl FractionNode {
    pub fn new(num: NodeId, denom: NodeId, style: FractionStyle) -> Self {
        Self { num, denom, style }
    }
}

/// A differential: the derivative operator part and the expression it
/// applies to. The operator slot is built under
/// [`FractionStyle::Derivative`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifferentialNode {
    pub diff: NodeId,
    pub base: NodeId,
}

impl DifferentialNode {
    pub fn new(diff: NodeId, base: NodeId) -> Self {
        Self { diff, base }
    }
}
