//! Group element
//!
//! A group bundles an editable source value with its computed outputs, or
//! forms a document block (title, section, code cell, image cell, page
//! break). Groups are the foldable unit: the chain of following groups a
//! section owns can be detached into the folded slot and reattached later.

use crate::ast::node::NodeId;
use serde::Serialize;
use std::fmt;

/// The block category a group represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKind {
    /// Editable input with computed outputs.
    Code,
    /// Plain text block.
    PlainText,
    Title,
    Section,
    Subsection,
    SubSubsection,
    /// An image with its caption source.
    Image,
    /// A forced page break between groups.
    PageBreak,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKind::Code => "code",
            GroupKind::PlainText => "text",
            GroupKind::Title => "title",
            GroupKind::Section => "section",
            GroupKind::Subsection => "subsection",
            GroupKind::SubSubsection => "subsubsection",
            GroupKind::Image => "image",
            GroupKind::PageBreak => "pagebreak",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNode {
    pub kind: GroupKind,
    /// The editable source value (an editor node).
    pub editor: Option<NodeId>,
    /// Head of the output chain.
    pub output: Option<NodeId>,
    /// Head of the folded successor chain, disjoint from every visible
    /// chain while set.
    pub folded: Option<NodeId>,
}

impl GroupNode {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            editor: None,
            output: None,
            folded: None,
        }
    }

    pub fn is_folded(&self) -> bool {
        self.folded.is_some()
    }

    /// True for the sectioning kinds that carry a heading.
    pub fn is_heading(&self) -> bool {
        matches!(
            self.kind,
            GroupKind::Title | GroupKind::Section | GroupKind::Subsection | GroupKind::SubSubsection
        )
    }
}
