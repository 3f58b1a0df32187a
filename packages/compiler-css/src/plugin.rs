use crate::minifier::{calculate_compression_ratio, minify_stylesheet};
use async_trait::async_trait;
use std::sync::Arc;
use weave_common::{CapabilityResult, PostProcessContext, StylePlugin};

/// Names accepted by [`builtin_plugin`]
pub const BUILTIN_PLUGINS: &[&str] = &["minify"];

/// Compresses the compiled stylesheet
#[derive(Debug, Default, Clone, Copy)]
pub struct MinifyCssPlugin;

#[async_trait]
impl StylePlugin for MinifyCssPlugin {
    fn name(&self) -> &str {
        "minify"
    }

    async fn process(&self, css: String, ctx: &PostProcessContext) -> CapabilityResult<String> {
        let minified = minify_stylesheet(&css);
        tracing::debug!(
            from = %ctx.from,
            original = css.len(),
            minified = minified.len(),
            "Minified stylesheet ({:.1}% smaller)",
            calculate_compression_ratio(css.len(), minified.len())
        );
        Ok(minified)
    }
}

/// Resolve a built-in post-processing plugin by name
pub fn builtin_plugin(name: &str) -> Option<Arc<dyn StylePlugin>> {
    match name {
        "minify" => Some(Arc::new(MinifyCssPlugin)),
        _ => None,
    }
}
