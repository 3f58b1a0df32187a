use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use weave_parser::ast::Span;

/// Lint rule that flags sections indenting some lines with tabs and others with spaces.
///
/// De-indentation only strips whitespace shared character-for-character, so
/// mixed indentation leaves stray leading whitespace in the compiled markup.
pub struct MixedIndentationRule;

impl LintRule for MixedIndentationRule {
    fn name(&self) -> &'static str {
        "mixed-indentation"
    }

    fn description(&self) -> &'static str {
        "Disallow mixing tabs and spaces for indentation"
    }

    fn check_raw(&self, raw: &str, offset: usize) -> Vec<Diagnostic> {
        let mut first: Option<char> = None;
        let mut line_start = 0;

        for line in raw.split_inclusive('\n') {
            let indent = line.chars().take_while(|ch| *ch == ' ' || *ch == '\t');
            let content = line.trim_start_matches([' ', '\t']);

            if !content.trim().is_empty() {
                for ch in indent {
                    match first {
                        None => first = Some(ch),
                        Some(expected) if expected != ch => {
                            let start = offset + line_start;
                            let used = if ch == '\t' { "tabs" } else { "spaces" };
                            return vec![Diagnostic::warning(
                                "mixed-indentation",
                                format!("Mixed indentation: this line uses {} after earlier lines used the other", used),
                                Span::new(start, start + line.trim_end_matches('\n').len()),
                            )
                            .with_suggestion("Indent the whole section with either tabs or spaces")];
                        }
                        Some(_) => {}
                    }
                }
            }

            line_start += line.len();
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_spaces_pass() {
        assert!(MixedIndentationRule.check_raw("\n  <div>\n    <p></p>\n  </div>\n", 0).is_empty());
    }

    #[test]
    fn test_flags_first_inconsistent_line() {
        let raw = "\n  <div>\n\t<p></p>\n\t<p></p>\n  </div>\n";
        let diagnostics = MixedIndentationRule.check_raw(raw, 100);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span.start, 100 + 9);
        assert!(diagnostics[0].message.contains("tabs"));
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        assert!(MixedIndentationRule.check_raw("\n\t\n  <br>\n", 0).is_empty());
    }
}
