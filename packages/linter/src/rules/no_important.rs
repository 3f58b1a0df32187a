use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use regex::Regex;
use weave_parser::ast::Element;

/// Lint rule that prevents use of !important in inline `style` attributes
pub struct NoImportantRule {
    pattern: Regex,
}

impl NoImportantRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"([a-zA-Z-]+)\s*:[^;]*!\s*important").expect("valid regex"),
        }
    }
}

impl Default for NoImportantRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule for NoImportantRule {
    fn name(&self) -> &'static str {
        "no-important"
    }

    fn description(&self) -> &'static str {
        "Disallow !important in inline style attributes"
    }

    fn check_element(&self, element: &Element) -> Vec<Diagnostic> {
        let Some(value) = element.attr("style").and_then(|attr| attr.value.as_deref()) else {
            return Vec::new();
        };

        self.pattern
            .captures_iter(value)
            .map(|captures| {
                let property = &captures[1];
                Diagnostic::warning(
                    "no-important",
                    format!(
                        "Avoid using !important in '{}'. It makes styles harder to override and maintain.",
                        property
                    ),
                    element.span,
                )
                .with_suggestion(format!(
                    "Move '{}' into the style section and rely on selector specificity instead",
                    property
                ))
            })
            .collect()
    }
}
