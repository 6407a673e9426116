//! The base node of the presentation tree
//!
//! Every node — leaf text, fraction, group — shares this shape: a
//! structural kind, a presentation category and text style, a cached
//! geometry block written by the external layout pass, break/hide flags,
//! and the dual linkage (content order and draw order) that later layout
//! walks.
//!
//! Ownership runs through the arena in [`crate::ast::tree`]: the `next`
//! link is the owning successor in content order, while `group`,
//! `next_to_draw` and `prev_to_draw` are weak handles that are never
//! followed during destruction.

use crate::ast::elements::NodeKind;
use serde::Serialize;
use std::fmt;

/// Cached layout dimension. `-1` is the dirty sentinel: the layout pass has
/// not run for this node yet.
pub type Dim = i32;

/// The dirty sentinel for all cached layout fields.
pub const DIRTY: Dim = -1;

/// Non-owning handle to a node in a [`crate::ast::NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Presentation category assigned by the parser and consumed by rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Category {
    #[default]
    Default,
    MainPrompt,
    Prompt,
    /// An output label.
    Label,
    /// Editable input.
    Input,
    /// Error output.
    Error,
    /// Text not part of any computation.
    Text,
    Title,
    Section,
    Subsection,
    SubSubsection,
    Image,
    Animation,
    Group,
}

/// Text style consumed by rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TextStyle {
    #[default]
    Default,
    Variable,
    Number,
    Function,
    GreekConstant,
    SpecialConstant,
    String,
    Label,
    UserLabel,
    Error,
}

impl TextStyle {
    pub fn name(self) -> &'static str {
        match self {
            TextStyle::Default => "default",
            TextStyle::Variable => "variable",
            TextStyle::Number => "number",
            TextStyle::Function => "function",
            TextStyle::GreekConstant => "greek",
            TextStyle::SpecialConstant => "special",
            TextStyle::String => "string",
            TextStyle::Label => "label",
            TextStyle::UserLabel => "userlabel",
            TextStyle::Error => "error",
        }
    }
}

/// One node of the presentation tree. See the module docs for the linkage
/// and ownership rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) category: Category,
    pub(crate) style: TextStyle,

    // Geometry cache, written by the external layout pass.
    pub(crate) width: Dim,
    pub(crate) height: Dim,
    pub(crate) center: Dim,
    // Line-aggregate caches over the draw chain, keyed on line starts.
    pub(crate) max_center: Dim,
    pub(crate) max_drop: Dim,

    // Break flags.
    pub(crate) break_line: bool,
    pub(crate) force_break_line: bool,
    pub(crate) break_page: bool,
    /// This node is currently presented as multiple draw fragments.
    pub(crate) is_broken: bool,

    pub(crate) hidden: bool,
    pub(crate) highlight: bool,

    // Linkage. `next` owns (through the arena); the rest are weak.
    pub(crate) group: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) next_to_draw: Option<NodeId>,
    pub(crate) prev_to_draw: Option<NodeId>,

    pub(crate) alt_copy_text: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            category: Category::Default,
            style: TextStyle::Default,
            width: DIRTY,
            height: DIRTY,
            center: DIRTY,
            max_center: DIRTY,
            max_drop: DIRTY,
            break_line: false,
            force_break_line: false,
            break_page: false,
            is_broken: false,
            hidden: false,
            highlight: false,
            group: None,
            next: None,
            next_to_draw: None,
            prev_to_draw: None,
            alt_copy_text: None,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    // --- geometry ---

    pub fn width(&self) -> Dim {
        self.width
    }

    pub fn height(&self) -> Dim {
        self.height
    }

    /// Distance from the top of the node to its baseline.
    pub fn center(&self) -> Dim {
        self.center
    }

    /// Distance from the baseline to the bottom of the node.
    pub fn drop(&self) -> Dim {
        if self.has_layout() {
            self.height - self.center
        } else {
            DIRTY
        }
    }

    /// True once a layout pass has written this node's geometry.
    pub fn has_layout(&self) -> bool {
        self.width != DIRTY && self.height != DIRTY && self.center != DIRTY
    }

    /// Written by the external layout pass.
    pub fn set_layout(&mut self, width: Dim, height: Dim, center: Dim) {
        self.width = width;
        self.height = height;
        self.center = center;
    }

    /// Mark the geometry (and the line aggregates keyed here) dirty.
    pub fn reset_layout(&mut self) {
        self.width = DIRTY;
        self.height = DIRTY;
        self.center = DIRTY;
        self.max_center = DIRTY;
        self.max_drop = DIRTY;
    }

    // --- break policy ---

    /// Allow or disallow a soft line break before this node.
    pub fn allow_break_line(&mut self, allow: bool) {
        self.break_line = allow;
    }

    /// True iff a soft break is allowed here and no forced break is
    /// already present.
    pub fn break_line_here(&self) -> bool {
        self.break_line && !self.force_break_line
    }

    /// Insert (or remove) a forced line break at this node. Forcing also
    /// marks the soft flag so the two are always consistent.
    pub fn force_break_line(&mut self, force: bool) {
        self.force_break_line = force;
        self.break_line = force;
    }

    pub fn forced_break_line(&self) -> bool {
        self.force_break_line
    }

    /// Request a page break before this node.
    pub fn break_page(&mut self, break_page: bool) {
        self.break_page = break_page;
    }

    pub fn break_page_here(&self) -> bool {
        self.break_page
    }

    /// True when a visual line starts at this node, for any reason.
    pub fn starts_new_line(&self) -> bool {
        self.break_line || self.force_break_line
    }

    /// The fixed number of draw fragments this node presents as.
    pub fn fragments(&self) -> usize {
        self.kind.fragments()
    }

    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    // --- visibility ---

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: bool) {
        self.highlight = highlight;
    }

    // --- linkage ---

    /// The enclosing group, when this node lives inside one.
    pub fn group(&self) -> Option<NodeId> {
        self.group
    }

    /// Content-order successor.
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Draw-order successor.
    pub fn next_to_draw(&self) -> Option<NodeId> {
        self.next_to_draw
    }

    /// Draw-order predecessor.
    pub fn prev_to_draw(&self) -> Option<NodeId> {
        self.prev_to_draw
    }

    // --- side channel ---

    pub fn alt_copy_text(&self) -> Option<&str> {
        self.alt_copy_text.as_deref()
    }

    pub fn set_alt_copy_text(&mut self, text: impl Into<String>) {
        self.alt_copy_text = Some(text.into());
    }
}
