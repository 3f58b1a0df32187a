use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use weave_parser::ast::Element;

const DEPRECATED_ELEMENTS: &[(&str, &str)] = &[
    ("acronym", "<abbr>"),
    ("big", "CSS font-size"),
    ("blink", "CSS animations"),
    ("center", "CSS text-align or flexbox"),
    ("font", "CSS font properties"),
    ("frame", "<iframe>"),
    ("frameset", "<iframe>"),
    ("marquee", "CSS animations"),
    ("strike", "<s> or <del>"),
    ("tt", "<code> or <kbd>"),
];

/// Lint rule that flags obsolete HTML elements
pub struct NoDeprecatedElementsRule;

impl LintRule for NoDeprecatedElementsRule {
    fn name(&self) -> &'static str {
        "no-deprecated-elements"
    }

    fn description(&self) -> &'static str {
        "Disallow obsolete HTML elements"
    }

    fn check_element(&self, element: &Element) -> Vec<Diagnostic> {
        DEPRECATED_ELEMENTS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&element.name))
            .map(|(name, replacement)| {
                Diagnostic::warning(
                    "no-deprecated-elements",
                    format!("<{}> is obsolete", name),
                    element.span,
                )
                .with_suggestion(format!("Use {} instead", replacement))
            })
            .into_iter()
            .collect()
    }
}
