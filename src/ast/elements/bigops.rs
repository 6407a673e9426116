//! Large-operator elements: limits, sums, integrals, function application

use crate::ast::node::NodeId;
use serde::Serialize;

/// A limit: the operator name, the approach expression below it and the
/// expression the limit is taken of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitNode {
    pub name: NodeId,
    pub under: NodeId,
    pub base: NodeId,
}

impl LimitNode {
    pub fn new(name: NodeId, under: NodeId, base: NodeId) -> Self {
        Self { name, under, base }
    }
}

/// Sum or product presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SumStyle {
    #[default]
    Sum,
    Product,
}

/// A sum/product with its lower bound, optional upper bound and body.
/// The upper bound is absent for the list-sum variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SumNode {
    pub under: NodeId,
    pub over: Option<NodeId>,
    pub base: NodeId,
    pub style: SumStyle,
}

impl SumNode {
    pub fn new(under: NodeId, over: Option<NodeId>, base: NodeId, style: SumStyle) -> Self {
        Self {
            under,
            over,
            base,
            style,
        }
    }
}

/// An integral. The definite form carries both bounds; the indefinite form
/// has only body and variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegralNode {
    pub under: Option<NodeId>,
    pub over: Option<NodeId>,
    pub base: NodeId,
    pub var: NodeId,
}

impl IntegralNode {
    pub fn definite(under: NodeId, over: NodeId, base: NodeId, var: NodeId) -> Self {
        Self {
            under: Some(under),
            over: Some(over),
            base,
            var,
        }
    }

    pub fn indefinite(base: NodeId, var: NodeId) -> Self {
        Self {
            under: None,
            over: None,
            base,
            var,
        }
    }

    pub fn is_definite(&self) -> bool {
        self.under.is_some()
    }
}

/// Function application: name followed by its (already parenthesized)
/// argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionNode {
    pub name: NodeId,
    pub arg: NodeId,
}

impl FunctionNode {
    pub fn new(name: NodeId, arg: NodeId) -> Self {
        Self { name, arg }
    }
}
