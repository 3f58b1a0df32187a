use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weave_compiler::PipelineConfig;

pub const DEFAULT_CONFIG_NAME: &str = "weave.config.json";

/// Weave configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source directory containing documents
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Document file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Output directory for compiled files
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Minifier, post-processing and per-language options
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_extension() -> String {
    "weave".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", config_path.display(), e))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            extension: default_extension(),
            out_dir: default_out_dir(),
            pipeline: PipelineConfig::default(),
        }
    }
}
