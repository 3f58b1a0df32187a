use serde::{Deserialize, Serialize};

/// Byte range into the original document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Shift a span produced against a sub-slice back into document coordinates
    pub fn offset(self, base: usize) -> Self {
        Self {
            start: self.start + base,
            end: self.end + base,
        }
    }
}

/// 1-based line and column of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Number of lines that precede this location in its document
    pub fn preceding_lines(&self) -> usize {
        self.line.saturating_sub(1) as usize
    }
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// How an attribute value was quoted in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quote {
    Double,
    Single,
    None,
}

/// Element attribute. `value` is `None` for bare attributes like `disabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
    pub quote: Quote,
    pub span: Span,
}

impl Attribute {
    pub fn is_bare(&self) -> bool {
        self.value.is_none()
    }
}

/// Ordered sequence of top-level sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionTree {
    pub nodes: Vec<SectionNode>,
}

impl SectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over nodes with the given name, in document order
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SectionNode> + 'a {
        self.nodes.iter().filter(move |node| node.name == name)
    }
}

/// A top-level region of the document (`<template>`, `<script>`, `<style>`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// Inner text exactly as written in the document
    pub raw: String,
    pub content: SectionContent,
    /// From `<` of the opening tag to `>` of the closing tag
    pub span: Span,
    pub content_span: Span,
    /// Position of the first content byte
    pub location: Location,
}

impl SectionNode {
    /// Value of the first attribute with this name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .and_then(|attr| attr.value.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }

    /// Sub-language declared through `lang="..."`, ignoring empty values
    pub fn lang(&self) -> Option<&str> {
        self.attr("lang").map(str::trim).filter(|lang| !lang.is_empty())
    }

    pub fn children(&self) -> &[MarkupNode] {
        match &self.content {
            SectionContent::Children(children) => children,
            SectionContent::Text(_) => &[],
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, SectionContent::Text(_))
    }
}

/// Section body: raw text, or a parsed markup subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SectionContent {
    Text(String),
    Children(Vec<MarkupNode>),
}

/// Node inside a markup subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkupNode {
    Element(Element),
    Text(TextNode),
    Comment(CommentNode),
}

impl MarkupNode {
    pub fn span(&self) -> Span {
        match self {
            MarkupNode::Element(element) => element.span,
            MarkupNode::Text(text) => text.span,
            MarkupNode::Comment(comment) => comment.span,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(element) => Some(element),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<MarkupNode>,
    /// Written as `<name ... />`
    pub self_closing: bool,
    pub span: Span,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.name)
    }

    /// True when the element is followed by an explicit closing tag
    pub fn has_closing_tag(&self) -> bool {
        !self.self_closing && !self.is_void()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    /// Text between `<!--` and `-->`
    pub value: String,
    pub span: Span,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements that never take a closing tag
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// Elements whose content is raw text rather than markup
pub fn is_raw_text_element(name: &str) -> bool {
    name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
}
