//! Markup reader
//!
//! Raw tokenization of persisted markup text using the logos lexer: the
//! source is split into tag tokens and text runs, and a single stack pass
//! assembles the element tree. The reader is deliberately small — it accepts
//! the fixed tag vocabulary this format uses and does not try to be a full
//! XML implementation.

use crate::markup::node::{MarkupElement, MarkupNode};
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    /// A complete tag, opening or closing: `<f line="no">`, `</f>`, `<br/>`.
    #[regex(r"<[^>]+>")]
    Tag,

    /// A run of character data between tags.
    #[regex(r"[^<]+")]
    Text,
}

/// Attribute pairs inside a tag body: `name="value"` or `name='value'`.
static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_.:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Errors produced while reading markup text into an element tree.
///
/// These are the only fatal conditions in the crate; everything downstream
/// of the reader recovers and degrades instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("malformed tag at byte {offset}")]
    MalformedTag { offset: usize },
    #[error("closing tag </{found}> does not match open element <{expected}>")]
    MismatchedClosingTag { expected: String, found: String },
    #[error("closing tag </{name}> with no open element")]
    StrayClosingTag { name: String },
    #[error("end of input while <{unclosed}> is still open")]
    UnexpectedEof { unclosed: String },
}

enum TagShape {
    Open(MarkupElement),
    SelfClosing(MarkupElement),
    Close(String),
    /// Comments, declarations and processing instructions.
    Skip,
}

/// Read markup text into a list of root nodes.
///
/// Whitespace-only text runs between elements are not significant in this
/// format and are dropped; text inside a leaf element is kept verbatim
/// (after entity decoding).
pub fn read_document(source: &str) -> Result<Vec<MarkupNode>, MarkupError> {
    let mut lexer = RawToken::lexer(source);
    let mut stack: Vec<MarkupElement> = Vec::new();
    let mut roots: Vec<MarkupNode> = Vec::new();

    while let Some(token) = lexer.next() {
        let token = token.map_err(|_| MarkupError::MalformedTag {
            offset: lexer.span().start,
        })?;
        match token {
            RawToken::Text => {
                let text = decode_entities(lexer.slice());
                if text.trim().is_empty() {
                    continue;
                }
                push_node(&mut stack, &mut roots, MarkupNode::Text(text));
            }
            RawToken::Tag => match classify_tag(lexer.slice(), lexer.span().start)? {
                TagShape::Skip => {}
                TagShape::Open(element) => stack.push(element),
                TagShape::SelfClosing(element) => {
                    push_node(&mut stack, &mut roots, MarkupNode::Element(element));
                }
                TagShape::Close(name) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| MarkupError::StrayClosingTag { name: name.clone() })?;
                    if element.name != name {
                        return Err(MarkupError::MismatchedClosingTag {
                            expected: element.name,
                            found: name,
                        });
                    }
                    push_node(&mut stack, &mut roots, MarkupNode::Element(element));
                }
            },
        }
    }

    if let Some(unclosed) = stack.pop() {
        return Err(MarkupError::UnexpectedEof {
            unclosed: unclosed.name,
        });
    }
    Ok(roots)
}

fn push_node(stack: &mut [MarkupElement], roots: &mut Vec<MarkupNode>, node: MarkupNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn classify_tag(slice: &str, offset: usize) -> Result<TagShape, MarkupError> {
    // Strip the angle brackets; the lexer guarantees both are present.
    let body = &slice[1..slice.len() - 1];

    if body.starts_with('!') || body.starts_with('?') {
        return Ok(TagShape::Skip);
    }

    if let Some(rest) = body.strip_prefix('/') {
        let name = rest.trim();
        if name.is_empty() {
            return Err(MarkupError::MalformedTag { offset });
        }
        return Ok(TagShape::Close(name.to_string()));
    }

    let self_closing = body.ends_with('/');
    let body = body.strip_suffix('/').unwrap_or(body).trim();

    let name_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let name = &body[..name_end];
    if name.is_empty() {
        return Err(MarkupError::MalformedTag { offset });
    }

    let mut element = MarkupElement::new(name);
    for captures in ATTRIBUTE_REGEX.captures_iter(&body[name_end..]) {
        let key = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        element
            .attributes
            .push((key.to_string(), decode_entities(value)));
    }

    if self_closing {
        Ok(TagShape::SelfClosing(element))
    } else {
        Ok(TagShape::Open(element))
    }
}

/// Decode the predefined entities plus numeric character references.
/// Unknown references are kept verbatim.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match rest.find(';') {
            // Entity names are short; a distant semicolon means a bare ampersand.
            Some(end) if end <= 10 => {
                let entity = &rest[1..end];
                match decode_entity(entity) {
                    Some(decoded) => out.push(decoded),
                    None => out.push_str(&rest[..=end]),
                }
                rest = &rest[end + 1..];
            }
            _ => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}
