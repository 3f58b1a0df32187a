use crate::error::{CompileError, CompileResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use weave_common::{PostProcessContext, StylePlugin};
use weave_compiler_css::builtin_plugin;
use weave_compiler_html::MinifyOptions;

static NO_OPTIONS: Value = Value::Null;

/// Read-only settings shared by every compile
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub minifier: MinifyOptions,
    pub post_processing: PostProcessOptions,
    /// Options handed to the capability of each language
    pub languages: HashMap<String, Value>,
    /// Run the advisory linter over un-`lang`ed markup
    pub lint: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            minifier: MinifyOptions::default(),
            post_processing: PostProcessOptions::default(),
            languages: HashMap::new(),
            lint: true,
        }
    }
}

impl PipelineOptions {
    pub fn language_options(&self, language: &str) -> &Value {
        self.languages
            .get(&language.to_ascii_lowercase())
            .unwrap_or(&NO_OPTIONS)
    }
}

/// Stylesheet post-processing chain
#[derive(Clone, Default)]
pub struct PostProcessOptions {
    /// Applied in order
    pub plugins: Vec<Arc<dyn StylePlugin>>,
    /// Input location; the document path when unset
    pub from: Option<String>,
    /// Output location; the document path when unset
    pub to: Option<String>,
}

impl PostProcessOptions {
    pub fn context(&self, document_id: &str) -> PostProcessContext {
        PostProcessContext::new(
            self.from.as_deref().unwrap_or(document_id),
            self.to.as_deref().unwrap_or(document_id),
        )
    }
}

impl fmt::Debug for PostProcessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plugins: Vec<&str> = self.plugins.iter().map(|plugin| plugin.name()).collect();
        f.debug_struct("PostProcessOptions")
            .field("plugins", &plugins)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

/// Serializable form of [`PipelineOptions`], as found in `weave.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    pub minifier: MinifyOptions,
    pub post_processing: PostProcessConfig,
    pub languages: HashMap<String, Value>,
    pub lint: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            minifier: MinifyOptions::recommended(),
            post_processing: PostProcessConfig::default(),
            languages: HashMap::new(),
            lint: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostProcessConfig {
    /// Built-in plugin names
    pub plugins: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl PipelineConfig {
    /// Resolve plugin names against the built-in plugin set
    pub fn into_options(self) -> CompileResult<PipelineOptions> {
        let plugins = self
            .post_processing
            .plugins
            .iter()
            .map(|name| builtin_plugin(name).ok_or_else(|| CompileError::UnknownPlugin { name: name.clone() }))
            .collect::<CompileResult<Vec<_>>>()?;

        let languages = self
            .languages
            .into_iter()
            .map(|(language, options)| (language.to_ascii_lowercase(), options))
            .collect();

        Ok(PipelineOptions {
            minifier: self.minifier,
            post_processing: PostProcessOptions {
                plugins,
                from: self.post_processing.from,
                to: self.post_processing.to,
            },
            languages,
            lint: self.lint,
        })
    }
}
