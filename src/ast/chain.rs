//! Chain and fold operations
//!
//! Hiding and showing a group's subordinate chain is pointer relinking
//! only: the chain segment moves between the group's successor link and
//! its folded slot, and no node is copied or destroyed. Fold and unfold
//! are mutual inverses. Break flags live on the chain nodes themselves, so
//! they survive any number of hide/show cycles.
//!
//! The same module hosts fragment splitting: a fraction can present as
//! numerator and denominator fragments spliced into the draw-order chain
//! while the content-order chain stays untouched.

use crate::ast::elements::NodeKind;
use crate::ast::node::NodeId;
use crate::ast::tree::NodeTree;

impl NodeTree {
    /// Store `head` as `group`'s folded chain and claim the chain for the
    /// group. Used when loading documents whose markup carries an explicit
    /// folded section.
    pub fn install_folded(&mut self, group_id: NodeId, head: NodeId) -> bool {
        match self[group_id].kind_mut().as_group_mut() {
            Some(group) => {
                group.folded = Some(head);
            }
            None => return false,
        }
        self.assign_group(head, group_id);
        true
    }

    /// Detach and return the folded chain, leaving the slot empty.
    pub fn take_folded(&mut self, group_id: NodeId) -> Option<NodeId> {
        self[group_id].kind_mut().as_group_mut()?.folded.take()
    }

    /// Hide: detach the group's successor chain into its folded slot.
    /// Returns false when there is nothing to fold or the slot is taken.
    pub fn fold(&mut self, group_id: NodeId) -> bool {
        let next = match self[group_id].next() {
            Some(next) => next,
            None => return false,
        };
        match self[group_id].kind().as_group() {
            Some(group) if group.folded.is_none() => {}
            _ => return false,
        }
        self[group_id].next = None;
        self[group_id].next_to_draw = None;
        self[next].prev_to_draw = None;
        self[group_id]
            .kind_mut()
            .as_group_mut()
            .expect("checked above")
            .folded = Some(next);
        true
    }

    /// Show: reattach the folded chain as the group's successor and clear
    /// the slot. Anything appended after the group while it was folded is
    /// relinked after the reattached chain.
    pub fn unfold(&mut self, group_id: NodeId) -> bool {
        let head = match self[group_id].kind_mut().as_group_mut() {
            Some(group) => match group.folded.take() {
                Some(head) => head,
                None => return false,
            },
            None => return false,
        };
        let old_next = self[group_id].next();
        self.splice(group_id, head);
        if let Some(old) = old_next {
            let tail = self.chain_tail(head);
            self.splice(tail, old);
        }
        true
    }

    /// Set the weak group back-reference on a chain and everything inside
    /// its composite slots. Chains are walked iteratively; slot nesting
    /// uses an explicit work list. Nested groups are claimed but their
    /// interiors are not: a group owns its own slots.
    pub fn assign_group(&mut self, head: NodeId, group_id: NodeId) {
        let mut work = vec![head];
        while let Some(chain_head) = work.pop() {
            let mut cursor = Some(chain_head);
            while let Some(id) = cursor {
                self[id].group = Some(group_id);
                if id == group_id || !self[id].kind().is_group() {
                    work.extend(self[id].kind().children());
                }
                cursor = self[id].next();
            }
        }
    }

    /// Split a node into its draw fragments. Only fractions present as
    /// more than one fragment; everything else reports false. The content
    /// chain is never touched.
    pub fn break_up(&mut self, id: NodeId) -> bool {
        let (num, denom) = match self[id].kind() {
            NodeKind::Fraction(frac) if !self[id].is_broken() => (frac.num, frac.denom),
            _ => return false,
        };
        let old_next = self[id].next_to_draw();
        self[id].is_broken = true;
        self[id].next_to_draw = Some(num);
        self[num].prev_to_draw = Some(id);
        let num_tail = self.chain_tail(num);
        self[num_tail].next_to_draw = Some(denom);
        self[denom].prev_to_draw = Some(num_tail);
        let denom_tail = self.chain_tail(denom);
        self[denom_tail].next_to_draw = old_next;
        if let Some(next) = old_next {
            self[next].prev_to_draw = Some(denom_tail);
        }
        true
    }

    /// Reverse a prior [`NodeTree::break_up`], restoring the draw chain to
    /// mirror the content chain.
    pub fn unbreak(&mut self, id: NodeId) {
        if !self[id].is_broken() {
            return;
        }
        self[id].is_broken = false;
        if let NodeKind::Fraction(frac) = self[id].kind() {
            let (num, denom) = (frac.num, frac.denom);
            self.restore_draw_links(num);
            self.restore_draw_links(denom);
        }
        let next = self[id].next();
        self[id].next_to_draw = next;
        if let Some(next) = next {
            self[next].prev_to_draw = Some(id);
        }
    }

    /// Unbreak every node of a content chain.
    pub fn unbreak_chain(&mut self, head: NodeId) {
        let chain: Vec<NodeId> = self.content_chain(head).collect();
        for id in chain {
            self.unbreak(id);
        }
    }

    fn restore_draw_links(&mut self, head: NodeId) {
        self[head].prev_to_draw = None;
        let mut cursor = head;
        loop {
            let next = self[cursor].next();
            self[cursor].next_to_draw = next;
            match next {
                Some(id) => {
                    self[id].prev_to_draw = Some(cursor);
                    cursor = id;
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::elements::{
        FractionNode, FractionStyle, GroupKind, GroupNode, TextNode,
    };
    use crate::ast::tree::NodeTree;

    fn leaf(tree: &mut NodeTree, text: &str) -> NodeId {
        tree.alloc(NodeKind::Text(TextNode::plain(text)))
    }

    fn group(tree: &mut NodeTree, kind: GroupKind) -> NodeId {
        tree.alloc(NodeKind::Group(GroupNode::new(kind)))
    }

    #[test]
    fn test_fold_unfold_round_trip() {
        let mut tree = NodeTree::new();
        let section = group(&mut tree, GroupKind::Section);
        let first = group(&mut tree, GroupKind::Code);
        let second = group(&mut tree, GroupKind::PlainText);
        tree.append(section, first);
        tree.append(section, second);
        tree[first].force_break_line(true);

        let before: Vec<NodeId> = tree.content_chain(section).collect();

        assert!(tree.fold(section));
        assert_eq!(tree[section].next(), None);
        assert_eq!(tree.chain_len(section), 1);
        assert!(tree[section].kind().as_group().unwrap().is_folded());
        // Folding again has nothing to move.
        assert!(!tree.fold(section));

        assert!(tree.unfold(section));
        let after: Vec<NodeId> = tree.content_chain(section).collect();
        assert_eq!(before, after);
        assert_eq!(tree.draw_chain_len(section), 3);
        // The forced break on the chain survived the cycle.
        assert!(tree[first].forced_break_line());
        assert!(!tree.unfold(section));
    }

    #[test]
    fn test_unfold_keeps_late_successors() {
        let mut tree = NodeTree::new();
        let section = group(&mut tree, GroupKind::Section);
        let folded = group(&mut tree, GroupKind::Code);
        tree.append(section, folded);
        assert!(tree.fold(section));

        // A group appended while the section is folded.
        let late = group(&mut tree, GroupKind::PlainText);
        tree.append(section, late);

        assert!(tree.unfold(section));
        let order: Vec<NodeId> = tree.content_chain(section).collect();
        assert_eq!(order, vec![section, folded, late]);
    }

    #[test]
    fn test_fold_requires_group() {
        let mut tree = NodeTree::new();
        let head = leaf(&mut tree, "x");
        let tail = leaf(&mut tree, "y");
        tree.append(head, tail);
        assert!(!tree.fold(head));
    }

    #[test]
    fn test_install_folded_sets_group_backref() {
        let mut tree = NodeTree::new();
        let section = group(&mut tree, GroupKind::Subsection);
        let hidden_head = group(&mut tree, GroupKind::Code);
        let hidden_tail = group(&mut tree, GroupKind::Code);
        tree.append(hidden_head, hidden_tail);
        assert!(tree.install_folded(section, hidden_head));
        assert_eq!(tree[hidden_head].group(), Some(section));
        assert_eq!(tree[hidden_tail].group(), Some(section));
        assert_eq!(tree.take_folded(section), Some(hidden_head));
        assert_eq!(tree.take_folded(section), None);
    }

    #[test]
    fn test_break_up_and_unbreak() {
        let mut tree = NodeTree::new();
        let num = leaf(&mut tree, "1");
        let denom = leaf(&mut tree, "2");
        let frac = tree.alloc(NodeKind::Fraction(FractionNode::new(
            num,
            denom,
            FractionStyle::Normal,
        )));
        let after = leaf(&mut tree, "x");
        tree.append(frac, after);

        assert_eq!(tree.draw_chain_len(frac), 2);
        assert!(tree.break_up(frac));
        assert!(tree[frac].is_broken());
        // The draw chain now visits the fragments; the content chain does not.
        let draw: Vec<NodeId> = tree.draw_chain(frac).collect();
        assert_eq!(draw, vec![frac, num, denom, after]);
        assert_eq!(tree.chain_len(frac), 2);
        // A second break-up is a no-op.
        assert!(!tree.break_up(frac));

        tree.unbreak(frac);
        assert!(!tree[frac].is_broken());
        let draw: Vec<NodeId> = tree.draw_chain(frac).collect();
        assert_eq!(draw, vec![frac, after]);
    }

    #[test]
    fn test_break_up_only_applies_to_fractions() {
        let mut tree = NodeTree::new();
        let id = leaf(&mut tree, "x");
        assert!(!tree.break_up(id));
        assert_eq!(tree[id].fragments(), 1);
    }
}
