use crate::result::CapabilityResult;
use async_trait::async_trait;

/// Input and output location identifiers handed to every plugin in the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessContext {
    pub from: String,
    pub to: String,
}

impl PostProcessContext {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One transform in the stylesheet post-processing chain
#[async_trait]
pub trait StylePlugin: Send + Sync {
    fn name(&self) -> &str;

    async fn process(&self, css: String, ctx: &PostProcessContext) -> CapabilityResult<String>;
}
