use async_trait::async_trait;
use weave_common::{Capability, CapabilityError, CapabilityResult, CompileContext, CompiledSection};

/// Baseline `css` capability: validates the stylesheet and passes it through
#[derive(Debug, Default, Clone, Copy)]
pub struct CssCompiler;

impl CssCompiler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Capability for CssCompiler {
    fn language(&self) -> &str {
        "css"
    }

    async fn compile(
        &self,
        source: &str,
        ctx: &CompileContext<'_>,
        _document_id: &str,
    ) -> CapabilityResult<CompiledSection> {
        check_stylesheet(source)?;
        // Padding lines only matter for error positions
        Ok(CompiledSection::new(source.trim(), ctx.kind))
    }
}

/// Check that blocks, strings and comments are balanced.
///
/// Errors carry the 1-based line and column in `source`.
pub fn check_stylesheet(source: &str) -> CapabilityResult<()> {
    let mut stack: Vec<(char, u32, u32)> = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1u32;
    let mut column = 0u32;

    while let Some(ch) = chars.next() {
        column += 1;
        if ch == '\n' {
            line += 1;
            column = 0;
            continue;
        }

        match ch {
            '/' if chars.peek() == Some(&'*') => {
                let (start_line, start_column) = (line, column);
                chars.next();
                column += 1;
                let mut closed = false;
                let mut prev = '\0';
                for c in chars.by_ref() {
                    column += 1;
                    if c == '\n' {
                        line += 1;
                        column = 0;
                    }
                    if prev == '*' && c == '/' {
                        closed = true;
                        break;
                    }
                    prev = c;
                }
                if !closed {
                    return Err(CapabilityError::at("Unterminated comment", start_line, start_column));
                }
            }
            '"' | '\'' => {
                let (start_line, start_column) = (line, column);
                let mut closed = false;
                while let Some(c) = chars.next() {
                    column += 1;
                    match c {
                        '\\' => {
                            if chars.next() == Some('\n') {
                                line += 1;
                                column = 0;
                            } else {
                                column += 1;
                            }
                        }
                        '\n' => break,
                        c if c == ch => {
                            closed = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(CapabilityError::at("Unterminated string", start_line, start_column));
                }
            }
            '{' | '(' | '[' => stack.push((ch, line, column)),
            '}' | ')' | ']' => {
                let expected = match ch {
                    '}' => '{',
                    ')' => '(',
                    _ => '[',
                };
                match stack.pop() {
                    Some((open, _, _)) if open == expected => {}
                    _ => return Err(CapabilityError::at(format!("Unexpected '{}'", ch), line, column)),
                }
            }
            _ => {}
        }
    }

    match stack.pop() {
        Some((open, open_line, open_column)) => Err(CapabilityError::at(
            format!("Unclosed '{}'", open),
            open_line,
            open_column,
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use weave_common::SectionKind;

    #[test]
    fn test_balanced_stylesheet() {
        let css = r#"
@media (min-width: 10px) {
  .a[data-x="}"] { content: '/* not a comment */'; }
}
/* { */
"#;
        assert!(check_stylesheet(css).is_ok());
    }

    #[test]
    fn test_unexpected_closing_brace_reports_line() {
        let err = check_stylesheet("\n\n.a { color: red; }}\n").unwrap_err();

        assert_eq!(err.message, "Unexpected '}'");
        assert_eq!(err.line, Some(3));
        assert_eq!(err.column, Some(19));
    }

    #[test]
    fn test_unclosed_block_points_at_opener() {
        let err = check_stylesheet(".a {\n  color: red;\n").unwrap_err();

        assert_eq!(err.message, "Unclosed '{'");
        assert_eq!((err.line, err.column), (Some(1), Some(4)));
    }

    #[test]
    fn test_unterminated_string_and_comment() {
        let err = check_stylesheet(".a { content: \"x; }\n").unwrap_err();
        assert_eq!(err.message, "Unterminated string");

        let err = check_stylesheet("\n/* open").unwrap_err();
        assert_eq!(err.message, "Unterminated comment");
        assert_eq!(err.line, Some(2));
    }

    #[tokio::test]
    async fn test_compile_trims_padding() {
        let tree = weave_parser::parse("<style>\n.a{}\n</style>").unwrap();
        let options = Value::Null;
        let ctx = CompileContext::new(SectionKind::Styling, &tree.nodes[0], &options);

        let compiled = CssCompiler.compile("\n\n\n.a { color: red }\n", &ctx, "App.weave").await.unwrap();

        assert_eq!(compiled.code, ".a { color: red }");
        assert_eq!(compiled.kind, SectionKind::Styling);
    }
}
