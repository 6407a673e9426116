//! Node storage and chain walking
//!
//! `NodeTree` is the arena every node lives in. Links between nodes are
//! [`NodeId`] handles into this storage, so dropping the tree frees the
//! whole document at once and a node can never outlive its successors.
//!
//! Line-aggregate queries walk the draw-order chain iteratively; documents
//! hold expressions of unbounded length and the walk must not recurse.

use crate::ast::elements::{GroupKind, NodeKind, SumStyle};
use crate::ast::node::{Dim, Node, NodeId, DIRTY};
use serde::Serialize;
use std::ops::{Index, IndexMut};

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node for `kind` and return its handle.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Total number of allocated nodes (all chains and slots).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- chain walking ---

    /// Content-order chain starting at `head`.
    pub fn content_chain(&self, head: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(head), move |&id| self[id].next)
    }

    /// Draw-order chain starting at `head`.
    pub fn draw_chain(&self, head: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(head), move |&id| self[id].next_to_draw)
    }

    pub fn chain_tail(&self, head: NodeId) -> NodeId {
        self.content_chain(head).last().unwrap_or(head)
    }

    pub fn chain_len(&self, head: NodeId) -> usize {
        self.content_chain(head).count()
    }

    pub fn draw_chain_len(&self, head: NodeId) -> usize {
        self.draw_chain(head).count()
    }

    /// Attach `new` at the tail of the content chain starting at `head`,
    /// mirroring the link into the draw chain. O(chain length).
    pub fn append(&mut self, head: NodeId, new: NodeId) {
        let tail = self.chain_tail(head);
        self.splice(tail, new);
    }

    /// Link `node` directly after `prev` in both content and draw order.
    pub fn splice(&mut self, prev: NodeId, node: NodeId) {
        self[prev].next = Some(node);
        self[prev].next_to_draw = Some(node);
        self[node].prev_to_draw = Some(prev);
    }

    // --- line aggregates (iterative over the draw chain) ---

    /// Greatest center (baseline offset) over the visual line starting at
    /// `start`. The result is cached on the line-start node.
    pub fn line_max_center(&mut self, start: NodeId) -> Dim {
        if self[start].max_center != DIRTY {
            return self[start].max_center;
        }
        let mut max = DIRTY;
        for id in self.line_run(start) {
            max = max.max(self[id].center);
        }
        self[start].max_center = max;
        max
    }

    /// Greatest drop (descender) over the visual line starting at `start`.
    pub fn line_max_drop(&mut self, start: NodeId) -> Dim {
        if self[start].max_drop != DIRTY {
            return self[start].max_drop;
        }
        let mut max = DIRTY;
        for id in self.line_run(start) {
            max = max.max(self[id].drop());
        }
        self[start].max_drop = max;
        max
    }

    /// Total height of the visual line starting at `start`.
    pub fn line_max_height(&mut self, start: NodeId) -> Dim {
        let center = self.line_max_center(start);
        let drop = self.line_max_drop(start);
        if center == DIRTY || drop == DIRTY {
            DIRTY
        } else {
            center + drop
        }
    }

    /// The draw-order run from `start` up to (excluding) the next node
    /// that begins a new line.
    fn line_run(&self, start: NodeId) -> Vec<NodeId> {
        let mut run = Vec::new();
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if id != start && self[id].starts_new_line() {
                break;
            }
            run.push(id);
            cursor = self[id].next_to_draw;
        }
        run
    }

    /// Mark every node's geometry dirty.
    pub fn reset_all_layout(&mut self) {
        for node in &mut self.nodes {
            node.reset_layout();
        }
    }

    // --- string export ---

    /// Export a whole chain, separating forced line breaks with newlines.
    pub fn chain_to_text(&self, head: NodeId) -> String {
        let mut out = String::new();
        for (index, id) in self.content_chain(head).enumerate() {
            if index > 0 && self[id].forced_break_line() {
                out.push('\n');
            }
            out.push_str(&self.to_text(id));
        }
        out
    }

    /// The string form of a single node (its slots included).
    pub fn to_text(&self, id: NodeId) -> String {
        match &self[id].kind {
            NodeKind::Text(text) => text.shown().to_string(),
            NodeKind::Editor(editor) => editor.text().to_string(),
            NodeKind::Fraction(frac) => format!(
                "{}/{}",
                self.chain_to_text(frac.num),
                self.chain_to_text(frac.denom)
            ),
            NodeKind::Power(power) => format!(
                "{}^{}",
                self.chain_to_text(power.base),
                self.chain_to_text(power.exponent)
            ),
            NodeKind::Subscript(sub) => format!(
                "{}[{}]",
                self.chain_to_text(sub.base),
                self.chain_to_text(sub.index)
            ),
            NodeKind::SubSup(subsup) => format!(
                "{}[{}]^{}",
                self.chain_to_text(subsup.base),
                self.chain_to_text(subsup.index),
                self.chain_to_text(subsup.exponent)
            ),
            NodeKind::Root(root) => format!("sqrt({})", self.chain_to_text(root.inner)),
            NodeKind::Abs(abs) => format!("abs({})", self.chain_to_text(abs.inner)),
            NodeKind::Conjugate(conjugate) => {
                format!("conjugate({})", self.chain_to_text(conjugate.inner))
            }
            NodeKind::Paren(paren) => format!("({})", self.chain_to_text(paren.inner)),
            NodeKind::Limit(limit) => format!(
                "limit({}, {})",
                self.chain_to_text(limit.base),
                self.chain_to_text(limit.under)
            ),
            NodeKind::Sum(sum) => {
                let name = match sum.style {
                    SumStyle::Sum => "sum",
                    SumStyle::Product => "product",
                };
                match sum.over {
                    Some(over) => format!(
                        "{}({}, {}, {})",
                        name,
                        self.chain_to_text(sum.base),
                        self.chain_to_text(sum.under),
                        self.chain_to_text(over)
                    ),
                    None => format!(
                        "{}({}, {})",
                        name,
                        self.chain_to_text(sum.base),
                        self.chain_to_text(sum.under)
                    ),
                }
            }
            NodeKind::Integral(int) => match (int.under, int.over) {
                (Some(under), Some(over)) => format!(
                    "integrate({}, {}, {}, {})",
                    self.chain_to_text(int.base),
                    self.chain_to_text(int.var),
                    self.chain_to_text(under),
                    self.chain_to_text(over)
                ),
                _ => format!(
                    "integrate({}, {})",
                    self.chain_to_text(int.base),
                    self.chain_to_text(int.var)
                ),
            },
            NodeKind::Function(function) => format!(
                "{}{}",
                self.chain_to_text(function.name),
                self.chain_to_text(function.arg)
            ),
            NodeKind::Matrix(matrix) => {
                let rows: Vec<String> = matrix
                    .rows
                    .iter()
                    .map(|row| {
                        let cells: Vec<String> = row
                            .iter()
                            .map(|cell| {
                                cell.map(|id| self.chain_to_text(id)).unwrap_or_default()
                            })
                            .collect();
                        format!("[{}]", cells.join(", "))
                    })
                    .collect();
                format!("matrix({})", rows.join(", "))
            }
            NodeKind::Differential(diff) => format!(
                "{}{}",
                self.chain_to_text(diff.diff),
                self.chain_to_text(diff.base)
            ),
            NodeKind::At(at) => format!(
                "at({}, {})",
                self.chain_to_text(at.base),
                self.chain_to_text(at.index)
            ),
            NodeKind::Image(_) => "<< Graphics >>".to_string(),
            NodeKind::Animation(_) => "<< Animation >>".to_string(),
            NodeKind::Group(group) => {
                let mut parts = Vec::new();
                if let Some(editor) = group.editor {
                    parts.push(self.chain_to_text(editor));
                }
                if let Some(output) = group.output {
                    parts.push(self.chain_to_text(output));
                }
                parts.join("\n")
            }
        }
    }

    // --- structural dump ---

    /// Indented structural dump of a chain, used by the CLI and snapshot
    /// tests.
    pub fn treeviz(&self, head: NodeId) -> String {
        let mut out = String::new();
        self.viz_chain(head, 0, &mut out);
        out
    }

    fn viz_chain(&self, head: NodeId, depth: usize, out: &mut String) {
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            self.viz_node(id, depth, out);
            cursor = self[id].next;
        }
    }

    fn viz_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push_str(&self.node_label(id));
        out.push('\n');
        for (name, slot) in self[id].kind.slots() {
            out.push_str(&indent);
            out.push_str("  ");
            out.push_str(&name);
            out.push_str(":\n");
            self.viz_chain(slot, depth + 2, out);
        }
    }

    fn node_label(&self, id: NodeId) -> String {
        let node = &self[id];
        let mut label = match &node.kind {
            NodeKind::Text(text) => {
                format!("Text({}) '{}'", node.style.name(), text.shown())
            }
            NodeKind::Editor(editor) => {
                format!("Editor '{}'", editor.text().replace('\n', "\\n"))
            }
            NodeKind::Fraction(frac) => match frac.style {
                crate::ast::elements::FractionStyle::Normal => "Fraction".to_string(),
                crate::ast::elements::FractionStyle::NoLine => "Fraction(noline)".to_string(),
                crate::ast::elements::FractionStyle::Derivative => {
                    "Fraction(derivative)".to_string()
                }
            },
            NodeKind::Sum(sum) => match sum.style {
                SumStyle::Sum => "Sum".to_string(),
                SumStyle::Product => "Product".to_string(),
            },
            NodeKind::Integral(int) => {
                if int.is_definite() {
                    "Integral(definite)".to_string()
                } else {
                    "Integral".to_string()
                }
            }
            NodeKind::Matrix(matrix) => {
                format!("Matrix {}x{}", matrix.row_count(), matrix.col_count())
            }
            NodeKind::Image(image) => format!("Image '{}'", image.filename),
            NodeKind::Animation(animation) => {
                format!("Animation [{} frames]", animation.frame_count())
            }
            NodeKind::Group(group) => format!("Group({})", group.kind),
            other => other.name().to_string(),
        };
        if node.force_break_line {
            label.push_str(" [break]");
        }
        if node.break_page && !matches!(&node.kind, NodeKind::Group(g) if g.kind == GroupKind::PageBreak)
        {
            label.push_str(" [pagebreak]");
        }
        if node.hidden {
            label.push_str(" [hidden]");
        }
        if node.highlight {
            label.push_str(" [highlight]");
        }
        label
    }
}

impl Index<NodeId> for NodeTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}

impl IndexMut<NodeId> for NodeTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.get_mut(id)
    }
}
