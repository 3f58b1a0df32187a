use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use weave_parser::ast::{Element, MarkupNode};

/// Accessibility lint rules
pub struct A11yRule;

impl LintRule for A11yRule {
    fn name(&self) -> &'static str {
        "a11y"
    }

    fn description(&self) -> &'static str {
        "Images need alternative text, buttons and links need accessible names, roles must be valid"
    }

    fn check_element(&self, element: &Element) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let tag_lower = element.name.to_lowercase();
        let span = element.span;

        // Check images for alt text
        if tag_lower == "img"
            && !has_any_attribute(element, &["alt", ":alt", "aria-label", "aria-labelledby", "role"])
        {
            diagnostics.push(
                Diagnostic::warning(
                    "a11y-img-alt",
                    "Images must have alternative text for screen readers",
                    span,
                )
                .with_suggestion(
                    "Add an 'alt' attribute describing the image content, or use 'aria-label' if appropriate",
                ),
            );
        }

        // Check buttons for accessible text
        if tag_lower == "button"
            && !has_text_content(&element.children)
            && !has_any_attribute(element, &["aria-label", "aria-labelledby"])
        {
            diagnostics.push(
                Diagnostic::warning("a11y-button-text", "Buttons must have accessible text content", span)
                    .with_suggestion("Add text content inside the button, or use 'aria-label' to provide a label"),
            );
        }

        // Check links for accessible text
        if tag_lower == "a"
            && !has_text_content(&element.children)
            && !has_any_attribute(element, &["aria-label", "aria-labelledby"])
        {
            diagnostics.push(
                Diagnostic::warning("a11y-link-text", "Links must have accessible text content", span)
                    .with_suggestion("Add text content inside the link, or use 'aria-label' to provide a label"),
            );
        }

        // Check for invalid ARIA roles (bound roles like `:role` are dynamic and skipped)
        if let Some(role) = element.attr("role").and_then(|attr| attr.value.as_deref()) {
            if !is_valid_aria_role(role) {
                diagnostics.push(
                    Diagnostic::warning("a11y-invalid-aria-role", format!("Invalid ARIA role: '{}'", role), span)
                        .with_suggestion(
                            "Use a valid ARIA role such as: button, link, navigation, main, complementary, banner, contentinfo, etc.",
                        ),
                );
            }
        }

        diagnostics
    }
}

fn has_any_attribute(element: &Element, names: &[&str]) -> bool {
    names.iter().any(|name| element.has_attr(name))
}

/// Text anywhere below the element, including interpolations like `{{ label }}`
fn has_text_content(children: &[MarkupNode]) -> bool {
    children.iter().any(|child| match child {
        MarkupNode::Text(text) => !text.value.trim().is_empty(),
        MarkupNode::Element(element) => has_text_content(&element.children),
        MarkupNode::Comment(_) => false,
    })
}

/// Check if a role is a valid ARIA role
fn is_valid_aria_role(role: &str) -> bool {
    matches!(
        role,
        // Document structure roles
        "article"
            | "cell"
            | "columnheader"
            | "complementary"
            | "contentinfo"
            | "definition"
            | "directory"
            | "document"
            | "feed"
            | "figure"
            | "group"
            | "heading"
            | "img"
            | "list"
            | "listitem"
            | "main"
            | "math"
            | "navigation"
            | "none"
            | "note"
            | "presentation"
            | "region"
            | "row"
            | "rowgroup"
            | "rowheader"
            | "separator"
            | "table"
            | "term"
            | "toolbar"
            // Widget roles
            | "alert"
            | "alertdialog"
            | "button"
            | "checkbox"
            | "dialog"
            | "gridcell"
            | "link"
            | "log"
            | "marquee"
            | "menuitem"
            | "menuitemcheckbox"
            | "menuitemradio"
            | "option"
            | "progressbar"
            | "radio"
            | "scrollbar"
            | "searchbox"
            | "slider"
            | "spinbutton"
            | "status"
            | "switch"
            | "tab"
            | "tabpanel"
            | "textbox"
            | "timer"
            | "tooltip"
            | "treeitem"
            // Landmark roles
            | "banner"
            | "form"
            | "search"
            | "application"
            // Composite roles
            | "combobox"
            | "grid"
            | "listbox"
            | "menu"
            | "menubar"
            | "radiogroup"
            | "tablist"
            | "tree"
            | "treegrid"
    )
}
