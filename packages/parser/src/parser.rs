use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::location::offset_to_location;
use crate::tokenizer::{ContentToken, TagToken};
use logos::Logos;

/// Parser for hybrid section documents and markup fragments
pub struct Parser<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// Parse a complete document into its top-level sections
    pub fn parse_document(&mut self) -> ParseResult<SectionTree> {
        let mut tree = SectionTree::new();

        while let Some((token, span)) = self.next_content()? {
            match token {
                ContentToken::OpenTag(name) => {
                    tree.nodes.push(self.parse_section(name, span)?);
                }
                ContentToken::CloseTag(name) => {
                    return Err(ParseError::invalid_syntax(
                        span,
                        format!("Unexpected closing tag </{}> at top level", name),
                    ));
                }
                // Whitespace, comments and stray text between sections carry no meaning
                ContentToken::Text(_)
                | ContentToken::LessThan(_)
                | ContentToken::Comment(_)
                | ContentToken::Declaration(_) => {}
            }
        }

        Ok(tree)
    }

    /// Parse a markup fragment (no enclosing section)
    pub fn parse_fragment(&mut self) -> ParseResult<Vec<MarkupNode>> {
        self.parse_children(None).map(|(nodes, _)| nodes)
    }

    fn parse_section(&mut self, name: &'src str, open: Span) -> ParseResult<SectionNode> {
        let start = open.start;
        let (attributes, self_closing) = self.parse_tag_attributes()?;
        let content_start = self.pos;
        let name = name.to_ascii_lowercase();

        if self_closing {
            return Ok(SectionNode {
                name,
                attributes,
                raw: String::new(),
                content: SectionContent::Text(String::new()),
                span: Span::new(start, self.pos),
                content_span: Span::new(content_start, content_start),
                location: offset_to_location(self.source, content_start),
            });
        }

        let has_lang = attributes
            .iter()
            .any(|attr| attr.name == "lang" && attr.value.as_deref().is_some_and(|v| !v.trim().is_empty()));

        let (content, content_end) = if name == "template" && !has_lang {
            let (children, content_end) =
                self.parse_children(Some((&name, Span::new(start, content_start))))?;
            (SectionContent::Children(children), content_end)
        } else {
            let content_end = self.consume_raw_text(&name, Span::new(start, content_start))?;
            let text = self.source[content_start..content_end].to_string();
            (SectionContent::Text(text), content_end)
        };

        Ok(SectionNode {
            name,
            attributes,
            raw: self.source[content_start..content_end].to_string(),
            content,
            span: Span::new(start, self.pos),
            content_span: Span::new(content_start, content_end),
            location: offset_to_location(self.source, content_start),
        })
    }

    /// Parse nodes until the parent's closing tag (or end of input for fragments).
    /// Returns the nodes and the offset where the closing tag starts.
    fn parse_children(&mut self, parent: Option<(&str, Span)>) -> ParseResult<(Vec<MarkupNode>, usize)> {
        let mut children: Vec<MarkupNode> = Vec::new();

        loop {
            let Some((token, span)) = self.next_content()? else {
                return match parent {
                    Some((name, open)) => Err(ParseError::unclosed_element(open, name)),
                    None => Ok((children, self.pos)),
                };
            };

            match token {
                ContentToken::Text(text)
                | ContentToken::LessThan(text)
                | ContentToken::Declaration(text) => push_text(&mut children, text, span),
                ContentToken::Comment(value) => {
                    children.push(MarkupNode::Comment(CommentNode {
                        value: value.to_string(),
                        span,
                    }));
                }
                ContentToken::OpenTag(name) => {
                    let element = self.parse_element(name, span)?;
                    children.push(MarkupNode::Element(element));
                }
                ContentToken::CloseTag(name) => {
                    return match parent {
                        Some((expected, _)) if expected.eq_ignore_ascii_case(name) => {
                            self.expect_tag_end()?;
                            Ok((children, span.start))
                        }
                        Some((expected, _)) => Err(ParseError::mismatched_closing_tag(span, expected, name)),
                        None => Err(ParseError::invalid_syntax(
                            span,
                            format!("Unexpected closing tag </{}>", name),
                        )),
                    };
                }
            }
        }
    }

    fn parse_element(&mut self, name: &'src str, open: Span) -> ParseResult<Element> {
        let start = open.start;
        let (attributes, self_closing) = self.parse_tag_attributes()?;
        let open_end = self.pos;

        if self_closing || is_void_element(name) {
            return Ok(Element {
                name: name.to_string(),
                attributes,
                children: Vec::new(),
                self_closing,
                span: Span::new(start, self.pos),
            });
        }

        let children = if is_raw_text_element(name) {
            let content_end = self.consume_raw_text(name, Span::new(start, open_end))?;
            let mut children = Vec::new();
            if content_end > open_end {
                children.push(MarkupNode::Text(TextNode {
                    value: self.source[open_end..content_end].to_string(),
                    span: Span::new(open_end, content_end),
                }));
            }
            children
        } else {
            self.parse_children(Some((name, Span::new(start, open_end))))?.0
        };

        Ok(Element {
            name: name.to_string(),
            attributes,
            children,
            self_closing: false,
            span: Span::new(start, self.pos),
        })
    }

    /// Read attributes up to and including `>` or `/>`
    fn parse_tag_attributes(&mut self) -> ParseResult<(Vec<Attribute>, bool)> {
        let source: &'src str = self.source;
        let base = self.pos;
        let mut lexer = TagToken::lexer(&source[base..]);
        let mut attributes = Vec::new();
        let mut pending: Option<(&'src str, Span)> = None;

        loop {
            let Some(result) = lexer.next() else {
                return Err(ParseError::unexpected_eof(self.source.len(), "'>'"));
            };
            let span = Span::new(lexer.span().start, lexer.span().end).offset(base);
            let token = result.map_err(|_| self.tag_lex_error(span))?;

            match token {
                TagToken::End | TagToken::SelfClosingEnd => {
                    if let Some((name, name_span)) = pending.take() {
                        attributes.push(bare_attribute(name, name_span));
                    }
                    self.pos = span.end;
                    return Ok((attributes, token == TagToken::SelfClosingEnd));
                }
                TagToken::Slash => {}
                TagToken::Name(name) => {
                    if let Some((prev, prev_span)) = pending.replace((name, span)) {
                        attributes.push(bare_attribute(prev, prev_span));
                    }
                }
                TagToken::Equals => {
                    let (name, name_span) = pending
                        .take()
                        .ok_or_else(|| ParseError::unexpected_token(span, "attribute name", "'='"))?;

                    if let Some((value, value_span)) = unquoted_value(&mut lexer) {
                        let value_span = value_span.offset(base);
                        attributes.push(Attribute {
                            name: name.to_string(),
                            value: Some(value.to_string()),
                            quote: Quote::None,
                            span: Span::new(name_span.start, value_span.end),
                        });
                        continue;
                    }

                    let Some(value) = lexer.next() else {
                        return Err(ParseError::unexpected_eof(self.source.len(), "attribute value"));
                    };
                    let value_span = Span::new(lexer.span().start, lexer.span().end).offset(base);
                    let value = value.map_err(|_| self.tag_lex_error(value_span))?;

                    let (value, quote) = match value {
                        TagToken::DoubleQuoted(v) => (v, Quote::Double),
                        TagToken::SingleQuoted(v) => (v, Quote::Single),
                        other => {
                            return Err(ParseError::unexpected_token(
                                value_span,
                                "attribute value",
                                other.to_string(),
                            ))
                        }
                    };

                    attributes.push(Attribute {
                        name: name.to_string(),
                        value: Some(value.to_string()),
                        quote,
                        span: Span::new(name_span.start, value_span.end),
                    });
                }
                TagToken::DoubleQuoted(_) | TagToken::SingleQuoted(_) => {
                    return Err(ParseError::unexpected_token(span, "attribute name", token.to_string()));
                }
            }
        }
    }

    /// Skip raw text up to `</name>`, returning where the text ends
    fn consume_raw_text(&mut self, name: &str, open: Span) -> ParseResult<usize> {
        let content_end =
            find_closing_tag(self.source, self.pos, name).ok_or_else(|| ParseError::unclosed_element(open, name))?;

        self.pos = content_end + 2 + name.len();
        self.expect_tag_end()?;
        Ok(content_end)
    }

    /// Consume optional whitespace and the `>` of a closing tag
    fn expect_tag_end(&mut self) -> ParseResult<()> {
        let source: &'src str = self.source;
        let base = self.pos;
        let mut lexer = TagToken::lexer(&source[base..]);

        match lexer.next() {
            Some(Ok(TagToken::End)) => {
                self.pos = base + lexer.span().end;
                Ok(())
            }
            Some(Ok(token)) => Err(ParseError::unexpected_token(
                Span::new(lexer.span().start, lexer.span().end).offset(base),
                "'>'",
                token.to_string(),
            )),
            Some(Err(())) => Err(self.tag_lex_error(Span::new(lexer.span().start, lexer.span().end).offset(base))),
            None => Err(ParseError::unexpected_eof(self.source.len(), "'>'")),
        }
    }

    fn next_content(&mut self) -> ParseResult<Option<(ContentToken<'src>, Span)>> {
        if self.pos >= self.source.len() {
            return Ok(None);
        }

        let source: &'src str = self.source;
        let rest = &source[self.pos..];
        let mut lexer = ContentToken::lexer(rest);

        match lexer.next() {
            Some(Ok(token)) => {
                let span = Span::new(lexer.span().start, lexer.span().end).offset(self.pos);
                self.pos = span.end;
                Ok(Some((token, span)))
            }
            Some(Err(())) => {
                let span = Span::new(self.pos, self.pos + lexer.span().end.max(1));
                if rest.starts_with("<!--") {
                    Err(ParseError::invalid_syntax(span, "Unterminated comment"))
                } else {
                    Err(ParseError::lexer_error(span))
                }
            }
            None => Ok(None),
        }
    }

    fn tag_lex_error(&self, span: Span) -> ParseError {
        match self.source[span.start..].chars().next() {
            Some('"') | Some('\'') => ParseError::invalid_syntax(span, "Unterminated attribute value"),
            Some('<') => ParseError::invalid_syntax(span, "Unexpected '<' inside tag"),
            _ => ParseError::lexer_error(span),
        }
    }
}

fn bare_attribute(name: &str, span: Span) -> Attribute {
    Attribute {
        name: name.to_string(),
        value: None,
        quote: Quote::None,
        span,
    }
}

/// Consume an unquoted attribute value following `=`. It may contain `/` and
/// `=`, and ends at whitespace or `>`; a trailing `/>` closes the tag instead.
/// The span is relative to the lexer source.
fn unquoted_value<'src>(lexer: &mut logos::Lexer<'src, TagToken<'src>>) -> Option<(&'src str, Span)> {
    let remainder: &'src str = lexer.remainder();
    let trimmed = remainder.trim_start_matches([' ', '\t', '\r', '\n', '\x0c']);
    if trimmed.starts_with(['"', '\'']) {
        return None;
    }

    let mut len = trimmed
        .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '<')
        .unwrap_or(trimmed.len());
    if len > 1 && trimmed[len..].starts_with('>') && trimmed[..len].ends_with('/') {
        len -= 1;
    }
    if len == 0 {
        return None;
    }

    let skipped = remainder.len() - trimmed.len();
    let start = lexer.span().end + skipped;
    lexer.bump(skipped + len);
    Some((&trimmed[..len], Span::new(start, start + len)))
}

/// Adjacent text tokens (`a`, `<`, ` b`) form a single text node
fn push_text(children: &mut Vec<MarkupNode>, text: &str, span: Span) {
    if let Some(MarkupNode::Text(last)) = children.last_mut() {
        if last.span.end == span.start {
            last.value.push_str(text);
            last.span.end = span.end;
            return;
        }
    }

    children.push(MarkupNode::Text(TextNode {
        value: text.to_string(),
        span,
    }));
}

/// Find `</name` (case-insensitive) followed by whitespace or `>`
fn find_closing_tag(source: &str, from: usize, name: &str) -> Option<usize> {
    let haystack = &source[from..];

    haystack.match_indices("</").find_map(|(idx, _)| {
        let after = &haystack[idx + 2..];
        let candidate = after.get(..name.len())?;
        if !candidate.eq_ignore_ascii_case(name) {
            return None;
        }
        match after[name.len()..].chars().next() {
            Some(ch) if ch == '>' || ch.is_ascii_whitespace() => Some(from + idx),
            _ => None,
        }
    })
}

/// Parse a document into its section tree
pub fn parse(source: &str) -> ParseResult<SectionTree> {
    Parser::new(source).parse_document()
}

/// Parse a standalone markup fragment
pub fn parse_fragment(source: &str) -> ParseResult<Vec<MarkupNode>> {
    Parser::new(source).parse_fragment()
}
