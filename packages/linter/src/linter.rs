use crate::diagnostic::Diagnostic;
use crate::rules::{LintRule, RuleRegistry};
use weave_common::{walk_element, SectionKind, Visitor};
use weave_parser::ast::{Element, SectionNode, SectionTree};
use weave_parser::offset_to_location;

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
}

/// Lint every markup section of a parsed document
pub fn lint_document(tree: &SectionTree, source: &str, options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();

    tree.named(SectionKind::Markup.tag_name())
        .flat_map(|section| lint_section(section, source, &registry))
        .collect()
}

/// Lint one markup section.
///
/// Rules see the raw, un-normalised section text and the parsed subtree.
/// Every diagnostic is located against the whole document.
pub fn lint_section(section: &SectionNode, source: &str, registry: &RuleRegistry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_raw(&section.raw, section.content_span.start));
    }

    let mut visitor = RuleVisitor {
        rules: registry.rules(),
        diagnostics: Vec::new(),
    };
    visitor.visit_nodes(section.children());
    diagnostics.extend(visitor.diagnostics);

    for diagnostic in &mut diagnostics {
        diagnostic.location = offset_to_location(source, diagnostic.span.start);
    }
    diagnostics.sort_by_key(|diagnostic| diagnostic.span.start);

    diagnostics
}

/// Runs every rule against every element of the tree
struct RuleVisitor<'a> {
    rules: &'a [Box<dyn LintRule>],
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Visitor for RuleVisitor<'a> {
    fn visit_element(&mut self, element: &Element) {
        for rule in self.rules {
            self.diagnostics.extend(rule.check_element(element));
        }
        walk_element(self, element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticLevel;
    use weave_parser::ast::Location;
    use weave_parser::parse;

    #[test]
    fn test_clean_template_has_no_findings() {
        let source = "<template>\n  <div><img src=\"a.png\" alt=\"A\"></div>\n</template>";
        let tree = parse(source).expect("Failed to parse");

        let diagnostics = lint_document(&tree, source, LintOptions::default());
        assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
    }

    #[test]
    fn test_locations_are_document_relative() {
        let source = "<script>\nexport default {}\n</script>\n<template>\n  <div>\n    <img src=\"a.png\">\n  </div>\n</template>";
        let tree = parse(source).expect("Failed to parse");

        let diagnostics = lint_document(&tree, source, LintOptions::default());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "a11y-img-alt");
        assert_eq!(diagnostics[0].location, Location::new(6, 5));
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Warning);
    }

    #[test]
    fn test_findings_are_sorted_by_position() {
        let source = "<template><center>x</center><img src=a.png></template>";
        let tree = parse(source).expect("Failed to parse");

        let diagnostics = lint_document(&tree, source, LintOptions::default());
        let rules: Vec<_> = diagnostics.iter().map(|d| d.rule.as_str()).collect();

        assert_eq!(rules, vec!["no-deprecated-elements", "a11y-img-alt"]);
    }

    #[test]
    fn test_empty_registry_reports_nothing() {
        let source = "<template><img></template>";
        let tree = parse(source).expect("Failed to parse");

        let options = LintOptions {
            registry: Some(RuleRegistry::empty()),
        };
        assert!(lint_document(&tree, source, options).is_empty());
    }

    #[test]
    fn test_raw_text_template_is_only_checked_as_text() {
        let source = "<template lang=\"pug\">\nimg(src=\"a.png\")\n</template>";
        let tree = parse(source).expect("Failed to parse");

        assert!(lint_document(&tree, source, LintOptions::default()).is_empty());
    }
}
