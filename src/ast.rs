//! Presentation tree
//!
//! The in-memory tree a parsed document becomes: a [`NodeTree`] arena of
//! [`Node`]s, each a structural [`elements::NodeKind`] plus the shared
//! geometry/break/linkage state, assembled into bidirectionally linked
//! draw-order chains with foldable groups.

pub mod chain;
pub mod elements;
pub mod node;
pub mod tree;

pub use elements::NodeKind;
pub use node::{Category, Dim, Node, NodeId, TextStyle, DIRTY};
pub use tree::NodeTree;
