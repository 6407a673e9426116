//! Markup element tree
//!
//! `MarkupNode` is the immutable input handed to the parser: either an
//! element (tag name, ordered attributes, children) or a raw text run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of the markup input tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupNode {
    Element(MarkupElement),
    Text(String),
}

/// A markup element: tag name, attributes in document order, children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl MarkupElement {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute by name; the first occurrence wins.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute lookup with a default for absent attributes.
    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    /// True when the element carries any attribute at all. Several legacy
    /// tags switch presentation on exactly this condition.
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Concatenated text of the element's direct text children.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let MarkupNode::Text(text) = child {
                out.push_str(text);
            }
        }
        out
    }

    /// The first child element with the given tag name.
    pub fn child_element(&self, name: &str) -> Option<&MarkupElement> {
        self.children.iter().find_map(|child| match child {
            MarkupNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }
}

impl MarkupNode {
    pub fn as_element(&self) -> Option<&MarkupElement> {
        match self {
            MarkupNode::Element(element) => Some(element),
            MarkupNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MarkupNode::Text(text) => Some(text),
            MarkupNode::Element(_) => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, MarkupNode::Element(_))
    }
}

impl fmt::Display for MarkupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupNode::Element(element) => write!(
                f,
                "<{}> ({} children)",
                element.name,
                element.children.len()
            ),
            MarkupNode::Text(text) => write!(f, "'{}'", text),
        }
    }
}
