use crate::scanner::mask_literals;
use regex::Regex;
use std::sync::OnceLock;
use weave_common::{CapabilityError, CapabilityResult, Injector};

fn component_object() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"export\s+default\s*(?:defineComponent\s*\(\s*)?\{").expect("component pattern is valid")
    })
}

/// Adds a `template` property holding the compiled markup to the default
/// exported component object.
///
/// Only code is searched; comments and literals that mention
/// `export default` are skipped. The property is inserted on the line of the
/// opening brace so the rest of the script keeps its line numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateInjector;

impl Injector for TemplateInjector {
    fn inject(&self, logic: &str, markup: &str) -> CapabilityResult<String> {
        let code = mask_literals(logic);
        let Some(found) = component_object().find(&code) else {
            return Err(CapabilityError::new(
                "Cannot inject template: no `export default { ... }` component object found",
            ));
        };

        let template = serde_json::to_string(markup)
            .map_err(|e| CapabilityError::new(format!("Cannot encode template: {}", e)))?;

        let mut woven = String::with_capacity(logic.len() + template.len() + 12);
        woven.push_str(&logic[..found.end()]);
        woven.push_str("template: ");
        woven.push_str(&template);
        woven.push(',');
        woven.push_str(&logic[found.end()..]);
        Ok(woven)
    }
}
