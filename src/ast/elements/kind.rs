//! The closed set of structural node kinds
//!
//! `NodeKind` is the common wrapper for everything a presentation tree can
//! contain. Keeping it a single enum makes kind dispatch exhaustive: adding
//! a kind fails to compile until every consumer handles it.

use super::bigops::{FunctionNode, IntegralNode, LimitNode, SumNode};
use super::fraction::{DifferentialNode, FractionNode};
use super::group::GroupNode;
use super::matrix::MatrixNode;
use super::media::{AnimationNode, ImageNode};
use super::scripts::{AtNode, PowerNode, SubSupNode, SubscriptNode};
use super::text::{EditorNode, TextNode};
use super::wrappers::{AbsNode, ConjugateNode, ParenNode, RootNode};
use crate::ast::node::NodeId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Text(TextNode),
    Editor(EditorNode),
    Fraction(FractionNode),
    Power(PowerNode),
    Subscript(SubscriptNode),
    SubSup(SubSupNode),
    Root(RootNode),
    Abs(AbsNode),
    Conjugate(ConjugateNode),
    Paren(ParenNode),
    Limit(LimitNode),
    Sum(SumNode),
    Integral(IntegralNode),
    Function(FunctionNode),
    Matrix(MatrixNode),
    Differential(DifferentialNode),
    At(AtNode),
    Image(ImageNode),
    Animation(AnimationNode),
    Group(GroupNode),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Text(_) => "Text",
            NodeKind::Editor(_) => "Editor",
            NodeKind::Fraction(_) => "Fraction",
            NodeKind::Power(_) => "Power",
            NodeKind::Subscript(_) => "Subscript",
            NodeKind::SubSup(_) => "SubSup",
            NodeKind::Root(_) => "Root",
            NodeKind::Abs(_) => "Abs",
            NodeKind::Conjugate(_) => "Conjugate",
            NodeKind::Paren(_) => "Paren",
            NodeKind::Limit(_) => "Limit",
            NodeKind::Sum(_) => "Sum",
            NodeKind::Integral(_) => "Integral",
            NodeKind::Function(_) => "Function",
            NodeKind::Matrix(_) => "Matrix",
            NodeKind::Differential(_) => "Differential",
            NodeKind::At(_) => "At",
            NodeKind::Image(_) => "Image",
            NodeKind::Animation(_) => "Animation",
            NodeKind::Group(_) => "Group",
        }
    }

    /// How many drawable fragments this kind presents as when broken up.
    /// Everything is a single fragment except fractions, which split into
    /// numerator and denominator.
    pub fn fragments(&self) -> usize {
        match self {
            NodeKind::Fraction(_) => 2,
            _ => 1,
        }
    }

    /// The named child slots in slot order. Each entry is the head of a
    /// chain. Group slots are listed editor, output, folded.
    pub fn slots(&self) -> Vec<(String, NodeId)> {
        match self {
            NodeKind::Text(_) | NodeKind::Editor(_) | NodeKind::Image(_) | NodeKind::Animation(_) => {
                Vec::new()
            }
            NodeKind::Fraction(frac) => vec![
                ("num".to_string(), frac.num),
                ("denom".to_string(), frac.denom),
            ],
            NodeKind::Power(power) => vec![
                ("base".to_string(), power.base),
                ("exponent".to_string(), power.exponent),
            ],
            NodeKind::Subscript(sub) => vec![
                ("base".to_string(), sub.base),
                ("index".to_string(), sub.index),
            ],
            NodeKind::SubSup(subsup) => vec![
                ("base".to_string(), subsup.base),
                ("index".to_string(), subsup.index),
                ("exponent".to_string(), subsup.exponent),
            ],
            NodeKind::Root(root) => vec![("inner".to_string(), root.inner)],
            NodeKind::Abs(abs) => vec![("inner".to_string(), abs.inner)],
            NodeKind::Conjugate(conjugate) => vec![("inner".to_string(), conjugate.inner)],
            NodeKind::Paren(paren) => vec![("inner".to_string(), paren.inner)],
            NodeKind::Limit(limit) => vec![
                ("name".to_string(), limit.name),
                ("under".to_string(), limit.under),
                ("base".to_string(), limit.base),
            ],
            NodeKind::Sum(sum) => {
                let mut slots = vec![("under".to_string(), sum.under)];
                if let Some(over) = sum.over {
                    slots.push(("over".to_string(), over));
                }
                slots.push(("base".to_string(), sum.base));
                slots
            }
            NodeKind::Integral(int) => {
                let mut slots = Vec::new();
                if let Some(under) = int.under {
                    slots.push(("under".to_string(), under));
                }
                if let Some(over) = int.over {
                    slots.push(("over".to_string(), over));
                }
                slots.push(("base".to_string(), int.base));
                slots.push(("var".to_string(), int.var));
                slots
            }
            NodeKind::Function(function) => vec![
                ("name".to_string(), function.name),
                ("arg".to_string(), function.arg),
            ],
            NodeKind::Matrix(matrix) => matrix
                .cells()
                .map(|(row, col, id)| (format!("cell[{}][{}]", row, col), id))
                .collect(),
            NodeKind::Differential(diff) => vec![
                ("diff".to_string(), diff.diff),
                ("base".to_string(), diff.base),
            ],
            NodeKind::At(at) => vec![
                ("base".to_string(), at.base),
                ("index".to_string(), at.index),
            ],
            NodeKind::Group(group) => {
                let mut slots = Vec::new();
                if let Some(editor) = group.editor {
                    slots.push(("editor".to_string(), editor));
                }
                if let Some(output) = group.output {
                    slots.push(("output".to_string(), output));
                }
                if let Some(folded) = group.folded {
                    slots.push(("folded".to_string(), folded));
                }
                slots
            }
        }
    }

    /// Chain heads of every child slot, in slot order.
    pub fn children(&self) -> Vec<NodeId> {
        self.slots().into_iter().map(|(_, id)| id).collect()
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Text(_))
    }
    pub fn is_group(&self) -> bool {
        matches!(self, NodeKind::Group(_))
    }
    pub fn is_editor(&self) -> bool {
        matches!(self, NodeKind::Editor(_))
    }
    pub fn is_fraction(&self) -> bool {
        matches!(self, NodeKind::Fraction(_))
    }
    pub fn is_matrix(&self) -> bool {
        matches!(self, NodeKind::Matrix(_))
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        if let NodeKind::Text(text) = self {
            Some(text)
        } else {
            None
        }
    }
    pub fn as_editor(&self) -> Option<&EditorNode> {
        if let NodeKind::Editor(editor) = self {
            Some(editor)
        } else {
            None
        }
    }
    pub fn as_fraction(&self) -> Option<&FractionNode> {
        if let NodeKind::Fraction(frac) = self {
            Some(frac)
        } else {
            None
        }
    }
    pub fn as_power(&self) -> Option<&PowerNode> {
        if let NodeKind::Power(power) = self {
            Some(power)
        } else {
            None
        }
    }
    pub fn as_subscript(&self) -> Option<&SubscriptNode> {
        if let NodeKind::Subscript(sub) = self {
            Some(sub)
        } else {
            None
        }
    }
    pub fn as_subsup(&self) -> Option<&SubSupNode> {
        if let NodeKind::SubSup(subsup) = self {
            Some(subsup)
        } else {
            None
        }
    }
    pub fn as_sum(&self) -> Option<&SumNode> {
        if let NodeKind::Sum(sum) = self {
            Some(sum)
        } else {
            None
        }
    }
    pub fn as_integral(&self) -> Option<&IntegralNode> {
        if let NodeKind::Integral(int) = self {
            Some(int)
        } else {
            None
        }
    }
    pub fn as_matrix(&self) -> Option<&MatrixNode> {
        if let NodeKind::Matrix(matrix) = self {
            Some(matrix)
        } else {
            None
        }
    }
    pub fn as_image(&self) -> Option<&ImageNode> {
        if let NodeKind::Image(image) = self {
            Some(image)
        } else {
            None
        }
    }
    pub fn as_animation(&self) -> Option<&AnimationNode> {
        if let NodeKind::Animation(animation) = self {
            Some(animation)
        } else {
            None
        }
    }
    pub fn as_group(&self) -> Option<&GroupNode> {
        if let NodeKind::Group(group) = self {
            Some(group)
        } else {
            None
        }
    }
    pub fn as_group_mut(&mut self) -> Option<&mut GroupNode> {
        if let NodeKind::Group(group) = self {
            Some(group)
        } else {
            None
        }
    }
}
