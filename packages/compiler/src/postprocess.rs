use crate::error::{CompileError, CompileResult};
use crate::options::PostProcessOptions;
use tracing::debug;

/// Run the stylesheet through every configured plugin in order
pub async fn run_chain(options: &PostProcessOptions, css: String, document_id: &str) -> CompileResult<String> {
    let ctx = options.context(document_id);
    let mut css = css;

    for plugin in &options.plugins {
        debug!(plugin = plugin.name(), from = %ctx.from, to = %ctx.to, "Running post-processing plugin");
        css = plugin
            .process(css, &ctx)
            .await
            .map_err(|source| CompileError::PostProcess {
                plugin: plugin.name().to_string(),
                source,
            })?;
    }

    Ok(css)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use weave_common::{CapabilityError, CapabilityResult, PostProcessContext, StylePlugin};

    struct Append(&'static str);

    #[async_trait]
    impl StylePlugin for Append {
        fn name(&self) -> &str {
            self.0
        }

        async fn process(&self, css: String, ctx: &PostProcessContext) -> CapabilityResult<String> {
            Ok(format!("{}/*{}:{}*/", css, self.0, ctx.to))
        }
    }

    struct Fail;

    #[async_trait]
    impl StylePlugin for Fail {
        fn name(&self) -> &str {
            "fail"
        }

        async fn process(&self, _css: String, _ctx: &PostProcessContext) -> CapabilityResult<String> {
            Err(CapabilityError::new("nope"))
        }
    }

    #[tokio::test]
    async fn test_plugins_run_in_order() {
        let options = PostProcessOptions {
            plugins: vec![Arc::new(Append("a")), Arc::new(Append("b"))],
            ..Default::default()
        };

        let css = run_chain(&options, ".x{}".to_string(), "App.weave").await.unwrap();

        assert_eq!(css, ".x{}/*a:App.weave*//*b:App.weave*/");
    }

    #[tokio::test]
    async fn test_failing_plugin_is_named() {
        let options = PostProcessOptions {
            plugins: vec![Arc::new(Append("a")), Arc::new(Fail)],
            ..Default::default()
        };

        let err = run_chain(&options, String::new(), "App.weave").await.unwrap_err();

        assert!(matches!(err, CompileError::PostProcess { ref plugin, .. } if plugin == "fail"));
    }

    #[tokio::test]
    async fn test_empty_chain_is_identity() {
        let css = run_chain(&PostProcessOptions::default(), ".a{}".to_string(), "x").await.unwrap();
        assert_eq!(css, ".a{}");
    }
}
