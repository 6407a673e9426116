//! Tag dispatch table
//!
//! The tag vocabulary is closed: every recognized tag maps to exactly one
//! constructor in the parser. The table is data, kept separate from the
//! parsing logic that consumes it.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Everything the markup format can spell at expression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    /// `v` — variable leaf.
    Variable,
    /// `t` — plain text leaf; `type="error"` selects the error style.
    Text,
    /// `n` — numeric leaf, subject to the digit limit.
    Number,
    /// `h` — hidden leaf (an elided multiplication sign).
    Hidden,
    /// `g` — greek-constant leaf.
    Greek,
    /// `s` — special-constant leaf.
    Special,
    /// `fnm` — function-name leaf.
    FunctionName,
    /// `st` — string leaf.
    StringText,
    /// `lbl` — output label; forces a line break.
    Label,
    /// `mspace` — a single space leaf.
    Space,
    /// `ascii` — leaf from a numeric character code.
    CharCode,
    /// `p` — parenthesis.
    Paren,
    /// `f` — fraction.
    Fraction,
    /// `e` — power.
    Power,
    /// `i` — subscript.
    Subscript,
    /// `ie` — subscript plus superscript.
    SubSup,
    /// `fn` — function application.
    Function,
    /// `q` — square root.
    Root,
    /// `d` — differential.
    Differential,
    /// `sm` — sum or product.
    Sum,
    /// `in` — integral.
    Integral,
    /// `at` — indexed access.
    At,
    /// `a` — absolute value.
    Abs,
    /// `cj` — complex conjugate.
    Conjugate,
    /// `lm` — limit.
    Limit,
    /// `r` — plain sequence of children.
    Sequence,
    /// `tb` — matrix/table.
    Matrix,
    /// `mth`/`line` — one output line; forces a break on its first node.
    MathLine,
    /// `hl` — highlighted subtree.
    Highlight,
    /// `img` — image reference.
    Image,
    /// `slide` — animation frame list.
    Animation,
    /// `editor` — editable source text.
    Editor,
    /// `cell` — document group.
    Cell,
}

pub(crate) static TAG_TABLE: Lazy<HashMap<&'static str, Tag>> = Lazy::new(|| {
    HashMap::from([
        ("v", Tag::Variable),
        ("t", Tag::Text),
        ("n", Tag::Number),
        ("h", Tag::Hidden),
        ("g", Tag::Greek),
        ("s", Tag::Special),
        ("fnm", Tag::FunctionName),
        ("st", Tag::StringText),
        ("lbl", Tag::Label),
        ("mspace", Tag::Space),
        ("ascii", Tag::CharCode),
        ("p", Tag::Paren),
        ("f", Tag::Fraction),
        ("e", Tag::Power),
        ("i", Tag::Subscript),
        ("ie", Tag::SubSup),
        ("fn", Tag::Function),
        ("q", Tag::Root),
        ("d", Tag::Differential),
        ("sm", Tag::Sum),
        ("in", Tag::Integral),
        ("at", Tag::At),
        ("a", Tag::Abs),
        ("cj", Tag::Conjugate),
        ("lm", Tag::Limit),
        ("r", Tag::Sequence),
        ("tb", Tag::Matrix),
        ("mth", Tag::MathLine),
        ("line", Tag::MathLine),
        ("hl", Tag::Highlight),
        ("img", Tag::Image),
        ("slide", Tag::Animation),
        ("editor", Tag::Editor),
        ("cell", Tag::Cell),
    ])
});
