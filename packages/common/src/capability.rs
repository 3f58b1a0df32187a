use crate::result::CapabilityResult;
use crate::section::SectionKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use weave_parser::ast::SectionNode;

/// Generated code for one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledSection {
    pub code: String,
    pub kind: SectionKind,
}

impl CompiledSection {
    pub fn new(code: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            code: code.into(),
            kind,
        }
    }

    /// Section text returned unchanged, used when no capability is registered
    pub fn passthrough(code: &str, kind: SectionKind) -> Self {
        Self::new(code, kind)
    }
}

/// Read-only context shared with a sub-compiler for one section
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    pub kind: SectionKind,
    /// Section the text was extracted from (attributes such as `scoped`)
    pub section: &'a SectionNode,
    /// Per-language options from the pipeline configuration
    pub options: &'a serde_json::Value,
}

impl<'a> CompileContext<'a> {
    pub fn new(kind: SectionKind, section: &'a SectionNode, options: &'a serde_json::Value) -> Self {
        Self {
            kind,
            section,
            options,
        }
    }

    /// Look up a per-language option by key
    pub fn option(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.options.get(key)
    }
}

/// A sub-compiler registered for one language identifier
#[async_trait]
pub trait Capability: Send + Sync {
    /// Language identifier matched against `lang` attributes
    fn language(&self) -> &str;

    /// Compile section text. Fails for malformed input.
    async fn compile(
        &self,
        source: &str,
        ctx: &CompileContext<'_>,
        document_id: &str,
    ) -> CapabilityResult<CompiledSection>;

    /// Languages that can host compiled markup expose an injector
    fn injector(&self) -> Option<&dyn Injector> {
        None
    }
}

/// Weaves compiled markup into logic text before the logic is compiled
pub trait Injector: Send + Sync {
    fn inject(&self, logic: &str, markup: &str) -> CapabilityResult<String>;
}
