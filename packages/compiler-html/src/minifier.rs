use crate::serializer::serialize;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use weave_common::{walk_element_mut, walk_nodes_mut, VisitorMut};
use weave_parser::ast::*;
use weave_parser::{parse_fragment, ParseError};

#[derive(Error, Debug)]
pub enum MinifyError {
    #[error("Compiled markup is not well-formed: {0}")]
    Parse(#[from] ParseError),
}

/// Markup minifier switches. Every switch is off by default, which makes
/// `minify` an exact serializer round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinifyOptions {
    /// Collapse whitespace runs to one space and drop insignificant whitespace
    pub collapse_whitespace: bool,
    pub remove_comments: bool,
    /// `disabled="disabled"` becomes `disabled`
    pub collapse_boolean_attributes: bool,
    /// Drop quotes around values that don't need them
    pub remove_attribute_quotes: bool,
}

impl MinifyOptions {
    /// No transformation at all
    pub fn none() -> Self {
        Self::default()
    }

    /// The settings `weave` uses when no configuration file overrides them
    pub fn recommended() -> Self {
        Self {
            collapse_whitespace: true,
            remove_comments: true,
            collapse_boolean_attributes: true,
            remove_attribute_quotes: false,
        }
    }

    pub fn is_noop(&self) -> bool {
        *self == Self::none()
    }
}

/// Minify markup text. With no transform enabled the text is returned as is,
/// without being parsed.
pub fn minify(markup: &str, options: &MinifyOptions) -> Result<String, MinifyError> {
    if options.is_noop() {
        return Ok(markup.to_string());
    }

    let mut nodes = parse_fragment(markup)?;
    minify_nodes(&mut nodes, options);
    Ok(serialize(&nodes))
}

/// Apply the enabled transforms to an already parsed fragment
pub fn minify_nodes(nodes: &mut Vec<MarkupNode>, options: &MinifyOptions) {
    if options.remove_comments {
        CommentStripper.visit_nodes_mut(nodes);
    }

    if options.collapse_whitespace {
        WhitespaceCollapser::default().visit_nodes_mut(nodes);
    }

    if options.collapse_boolean_attributes || options.remove_attribute_quotes {
        AttributeRewriter {
            collapse_boolean: options.collapse_boolean_attributes,
            remove_quotes: options.remove_attribute_quotes,
        }
        .visit_nodes_mut(nodes);
    }
}

struct CommentStripper;

impl VisitorMut for CommentStripper {
    fn visit_nodes_mut(&mut self, nodes: &mut Vec<MarkupNode>) {
        nodes.retain(|node| !matches!(node, MarkupNode::Comment(_)));
        walk_nodes_mut(self, nodes);
    }
}

/// Tracks the enclosing elements so whitespace inside `pre`, `textarea`
/// and raw-text elements is left alone
#[derive(Default)]
struct WhitespaceCollapser {
    stack: Vec<String>,
}

impl WhitespaceCollapser {
    fn preserving(&self) -> bool {
        self.stack
            .iter()
            .any(|name| is_whitespace_sensitive(name) || is_raw_text_element(name))
    }

    fn parent_is_inline(&self) -> bool {
        self.stack.last().is_some_and(|name| is_inline_element(name))
    }
}

impl VisitorMut for WhitespaceCollapser {
    fn visit_nodes_mut(&mut self, nodes: &mut Vec<MarkupNode>) {
        if self.preserving() {
            return;
        }

        for node in nodes.iter_mut() {
            if let MarkupNode::Text(text) = node {
                text.value = collapse_runs(&text.value);
            }
        }

        // Whitespace-only text survives only between inline content
        let keep: Vec<bool> = (0..nodes.len())
            .map(|idx| match &nodes[idx] {
                MarkupNode::Text(text) if text.value.trim().is_empty() => {
                    idx > 0
                        && idx + 1 < nodes.len()
                        && is_inline_node(&nodes[idx - 1])
                        && is_inline_node(&nodes[idx + 1])
                }
                _ => true,
            })
            .collect();
        let mut keep = keep.into_iter();
        nodes.retain(|_| keep.next().unwrap_or(true));

        if !self.parent_is_inline() {
            if let Some(MarkupNode::Text(first)) = nodes.first_mut() {
                first.value = first.value.trim_start().to_string();
            }
            if let Some(MarkupNode::Text(last)) = nodes.last_mut() {
                last.value = last.value.trim_end().to_string();
            }
            nodes.retain(|node| !matches!(node, MarkupNode::Text(text) if text.value.is_empty()));
        }

        walk_nodes_mut(self, nodes);
    }

    fn visit_element_mut(&mut self, element: &mut Element) {
        self.stack.push(element.name.to_ascii_lowercase());
        walk_element_mut(self, element);
        self.stack.pop();
    }
}

struct AttributeRewriter {
    collapse_boolean: bool,
    remove_quotes: bool,
}

impl VisitorMut for AttributeRewriter {
    fn visit_element_mut(&mut self, element: &mut Element) {
        for attribute in &mut element.attributes {
            if self.collapse_boolean && is_boolean_attribute(&attribute.name) {
                let collapsible = attribute
                    .value
                    .as_deref()
                    .is_some_and(|value| value.is_empty() || value.eq_ignore_ascii_case(&attribute.name));
                if collapsible {
                    attribute.value = None;
                    attribute.quote = Quote::None;
                }
            }

            if self.remove_quotes && attribute.value.as_deref().is_some_and(can_unquote) {
                attribute.quote = Quote::None;
            }
        }

        walk_element_mut(self, element);
    }
}

fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }

    out
}

fn can_unquote(value: &str) -> bool {
    !value.is_empty()
        && !value
            .chars()
            .any(|ch| ch.is_whitespace() || matches!(ch, '"' | '\'' | '`' | '=' | '<' | '>'))
        && !value.ends_with('/')
}

fn is_inline_node(node: &MarkupNode) -> bool {
    match node {
        MarkupNode::Element(element) => is_inline_element(&element.name.to_ascii_lowercase()),
        MarkupNode::Text(_) => true,
        MarkupNode::Comment(_) => false,
    }
}

fn is_whitespace_sensitive(name: &str) -> bool {
    matches!(name, "pre" | "textarea")
}

fn is_inline_element(name: &str) -> bool {
    matches!(
        name,
        "a" | "abbr"
            | "b"
            | "bdi"
            | "bdo"
            | "br"
            | "button"
            | "cite"
            | "code"
            | "data"
            | "dfn"
            | "em"
            | "i"
            | "img"
            | "input"
            | "kbd"
            | "label"
            | "mark"
            | "q"
            | "s"
            | "samp"
            | "select"
            | "small"
            | "span"
            | "strong"
            | "sub"
            | "sup"
            | "textarea"
            | "time"
            | "u"
            | "var"
    )
}

fn is_boolean_attribute(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "allowfullscreen"
            | "async"
            | "autofocus"
            | "autoplay"
            | "checked"
            | "controls"
            | "default"
            | "defer"
            | "disabled"
            | "formnovalidate"
            | "hidden"
            | "ismap"
            | "loop"
            | "multiple"
            | "muted"
            | "nomodule"
            | "novalidate"
            | "open"
            | "readonly"
            | "required"
            | "reversed"
            | "selected"
    )
}
