use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use weave_common::Capability;
use weave_compiler_css::CssCompiler;
use weave_compiler_js::JsCompiler;

/// Sub-compilers keyed by language identifier.
///
/// Built once and shared read-only between compiles. Identifiers are matched
/// case-insensitively.
#[derive(Clone, Default)]
pub struct CompilerRegistry {
    entries: HashMap<String, Arc<dyn Capability>>,
}

impl CompilerRegistry {
    /// An empty registry: every section is passed through
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the baseline `css` and `js` capabilities
    pub fn builtin() -> Self {
        Self::new().with(CssCompiler::new()).with(JsCompiler::new())
    }

    /// Register a capability under its own language identifier, returning
    /// the entry it replaced
    pub fn register<C: Capability + 'static>(&mut self, capability: C) -> Option<Arc<dyn Capability>> {
        let language = capability.language().to_string();
        self.register_as(&language, Arc::new(capability))
    }

    /// Register a capability under an alias such as `ts` or `scss`
    pub fn register_as(&mut self, language: &str, capability: Arc<dyn Capability>) -> Option<Arc<dyn Capability>> {
        self.entries.insert(language.to_ascii_lowercase(), capability)
    }

    pub fn with<C: Capability + 'static>(mut self, capability: C) -> Self {
        self.register(capability);
        self
    }

    pub fn lookup(&self, language: &str) -> Option<&dyn Capability> {
        self.entries.get(&language.to_ascii_lowercase()).map(|entry| entry.as_ref())
    }

    pub fn contains(&self, language: &str) -> bool {
        self.entries.contains_key(&language.to_ascii_lowercase())
    }

    /// Registered identifiers in sorted order
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}

impl fmt::Debug for CompilerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use weave_common::{CapabilityResult, CompileContext, CompiledSection};

    struct Upper;

    #[async_trait]
    impl Capability for Upper {
        fn language(&self) -> &str {
            "upper"
        }

        async fn compile(
            &self,
            source: &str,
            ctx: &CompileContext<'_>,
            _document_id: &str,
        ) -> CapabilityResult<CompiledSection> {
            Ok(CompiledSection::new(source.to_uppercase(), ctx.kind))
        }
    }

    #[test]
    fn test_builtin_languages() {
        let registry = CompilerRegistry::builtin();

        assert_eq!(registry.languages(), vec!["css", "js"]);
        assert!(registry.lookup("js").is_some_and(|js| js.injector().is_some()));
        assert!(registry.lookup("css").is_some_and(|css| css.injector().is_none()));
    }

    #[test]
    fn test_registries_are_isolated() {
        let mut custom = CompilerRegistry::new();
        custom.register(Upper);
        custom.register_as("ts", Arc::new(Upper));

        assert!(custom.contains("UPPER"));
        assert!(custom.contains("ts"));
        assert!(!CompilerRegistry::builtin().contains("upper"));
        assert!(CompilerRegistry::new().lookup("js").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = CompilerRegistry::builtin();
        let previous = registry.register_as("js", Arc::new(Upper));

        assert!(previous.is_some());
        assert_eq!(registry.lookup("js").map(|c| c.language()), Some("upper"));
        assert_eq!(format!("{:?}", registry), r#"CompilerRegistry { languages: ["css", "js"] }"#);
    }
}
