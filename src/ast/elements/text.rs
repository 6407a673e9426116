//! Leaf text elements
//!
//! `TextNode` covers plain text, variables, numbers, labels and the other
//! styled leaves. The raw value is always kept in full; what the renderer
//! shows may be a normalized or elided form of it.

use serde::Serialize;

/// A leaf carrying character data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextNode {
    /// The full raw value, untouched. Re-serialization reads this.
    value: String,
    /// The display form: control characters normalized, hyphens shown as
    /// minus signs, long numerics elided.
    shown: String,
}

impl TextNode {
    pub fn new(value: impl Into<String>, shown: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            shown: shown.into(),
        }
    }

    /// A leaf whose display form equals its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        let shown = value.clone();
        Self { value, shown }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn shown(&self) -> &str {
        &self.shown
    }

    /// True when the display form differs from the raw value.
    pub fn is_rewritten(&self) -> bool {
        self.value != self.shown
    }
}

/// Editable source text of a group (the user-visible input of a code cell,
/// the body of a text cell, a section heading, ...). Lines are stored
/// joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorNode {
    text: String,
}

impl EditorNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.text.lines().count()
        }
    }
}
