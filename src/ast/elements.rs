//! Structural element kinds of the presentation tree

pub mod bigops;
pub mod fraction;
pub mod group;
pub mod kind;
pub mod matrix;
pub mod media;
pub mod scripts;
pub mod text;
pub mod wrappers;

pub use bigops::{FunctionNode, IntegralNode, LimitNode, SumNode, SumStyle};
pub use fraction::{DifferentialNode, FractionNode, FractionStyle};
pub use group::{GroupKind, GroupNode};
pub use kind::NodeKind;
pub use matrix::MatrixNode;
pub use media::{AnimationNode, ImageNode};
pub use scripts::{AtNode, PowerNode, SubSupNode, SubscriptNode};
pub use text::{EditorNode, TextNode};
pub use wrappers::{AbsNode, ConjugateNode, ParenNode, RootNode};
