use thiserror::Error;
use weave_common::{CapabilityError, SectionKind};
use weave_compiler_html::MinifyError;
use weave_parser::ParseError;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("A document may contain at most one <template> section, found {count}")]
    Structural { count: usize },

    #[error("{kind} compiler '{language}' failed: {source}")]
    SubCompiler {
        language: String,
        kind: SectionKind,
        #[source]
        source: CapabilityError,
    },

    #[error("Language '{language}' has no injector; compiled markup cannot be woven into its logic")]
    MissingInject { language: String },

    #[error("Document has no <script> section")]
    MissingLogic,

    #[error("Compiled markup could not be minified: {0}")]
    Minify(#[from] MinifyError),

    #[error("Post-processing plugin '{plugin}' failed: {source}")]
    PostProcess {
        plugin: String,
        #[source]
        source: CapabilityError,
    },

    #[error("Unknown post-processing plugin '{name}'")]
    UnknownPlugin { name: String },

    #[error("Failed to encode compiled output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CompileError {
    pub fn sub_compiler(language: &str, kind: SectionKind, source: CapabilityError) -> Self {
        CompileError::SubCompiler {
            language: language.to_string(),
            kind,
            source,
        }
    }

    /// Raised before any sub-compiler ran
    pub fn is_structural(&self) -> bool {
        matches!(self, CompileError::Structural { .. })
    }

    /// Document line reported by a failing sub-compiler or plugin
    pub fn line(&self) -> Option<u32> {
        match self {
            CompileError::SubCompiler { source, .. } | CompileError::PostProcess { source, .. } => source.line,
            _ => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
