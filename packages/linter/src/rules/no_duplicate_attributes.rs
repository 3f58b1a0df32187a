use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use std::collections::HashSet;
use weave_parser::ast::Element;

/// Lint rule that flags an attribute written twice on the same element
pub struct NoDuplicateAttributesRule;

impl LintRule for NoDuplicateAttributesRule {
    fn name(&self) -> &'static str {
        "no-duplicate-attributes"
    }

    fn description(&self) -> &'static str {
        "Disallow repeating an attribute on one element"
    }

    fn check_element(&self, element: &Element) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();

        element
            .attributes
            .iter()
            .filter(|attr| !seen.insert(attr.name.to_ascii_lowercase()))
            .map(|attr| {
                Diagnostic::warning(
                    "no-duplicate-attributes",
                    format!("Duplicate attribute '{}' on <{}>", attr.name, element.name),
                    attr.span,
                )
                .with_suggestion("Only the first occurrence is honoured by browsers; remove the others")
            })
            .collect()
    }
}
