mod a11y;
mod mixed_indentation;
mod no_deprecated_elements;
mod no_duplicate_attributes;
mod no_important;

pub use a11y::A11yRule;
pub use mixed_indentation::MixedIndentationRule;
pub use no_deprecated_elements::NoDeprecatedElementsRule;
pub use no_duplicate_attributes::NoDuplicateAttributesRule;
pub use no_important::NoImportantRule;

use crate::diagnostic::Diagnostic;
use weave_parser::ast::Element;

/// Trait for implementing lint rules
pub trait LintRule: Send + Sync {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check one element of the markup tree (children are visited separately)
    fn check_element(&self, _element: &Element) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check the raw section text, which starts at byte `offset` of the document
    fn check_raw(&self, _raw: &str, _offset: usize) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(A11yRule),
                Box::new(NoDuplicateAttributesRule),
                Box::new(NoDeprecatedElementsRule),
                Box::new(NoImportantRule::new()),
                Box::new(MixedIndentationRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
