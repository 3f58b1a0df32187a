use crate::injector::TemplateInjector;
use crate::scanner::check_script;
use async_trait::async_trait;
use weave_common::{Capability, CapabilityResult, CompileContext, CompiledSection, Injector};

/// Baseline `js` capability.
///
/// Checks that the script is well-formed and passes it through. Set the
/// per-language option `"check": false` to skip the check.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsCompiler {
    injector: TemplateInjector,
}

impl JsCompiler {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Capability for JsCompiler {
    fn language(&self) -> &str {
        "js"
    }

    async fn compile(
        &self,
        source: &str,
        ctx: &CompileContext<'_>,
        _document_id: &str,
    ) -> CapabilityResult<CompiledSection> {
        let check = ctx.option("check").and_then(|v| v.as_bool()).unwrap_or(true);
        if check {
            check_script(source)?;
        }

        let mut code = source.trim().to_string();
        code.push('\n');
        Ok(CompiledSection::new(code, ctx.kind))
    }

    fn injector(&self) -> Option<&dyn Injector> {
        Some(&self.injector)
    }
}
