//! Compiles a Weave document: parses it into sections, validates and
//! classifies them, runs each section through the sub-compiler registered for
//! its language and weaves the compiled markup into the compiled logic.

pub mod classifier;
pub mod dedent;
pub mod diagnostics;
pub mod error;
pub mod logic;
pub mod markup;
pub mod options;
pub mod pipeline;
pub mod postprocess;
pub mod registry;
pub mod styling;
pub mod validator;

pub use classifier::{classify, SectionSlots};
pub use dedent::{dedent, pad_lines};
pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use error::{CompileError, CompileResult};
pub use options::{PipelineConfig, PipelineOptions, PostProcessConfig, PostProcessOptions};
pub use pipeline::{CompileOutput, Pipeline, SourceDocument, Stage};
pub use registry::CompilerRegistry;
pub use styling::STYLE_INJECT_SYMBOL;
pub use validator::validate;

pub use weave_common::{
    Capability, CapabilityError, CapabilityResult, CompileContext, CompiledSection, Injector,
    PostProcessContext, SectionKind, StylePlugin,
};
pub use weave_compiler_html::MinifyOptions;
pub use weave_linter::{Diagnostic, RuleRegistry};
