use crate::classifier::{classify, SectionSlots};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{CompileError, CompileResult};
use crate::options::PipelineOptions;
use crate::registry::CompilerRegistry;
use crate::validator::{markup_count, validate};
use crate::{logic, markup, styling};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use weave_common::{CompileContext, CompiledSection, SectionKind};
use weave_linter::RuleRegistry;
use weave_parser::ast::SectionNode;
use weave_parser::parse;

/// The document being compiled. Never modified.
#[derive(Debug, Clone, Copy)]
pub struct SourceDocument<'a> {
    pub source: &'a str,
    pub id: &'a str,
}

/// Progress of one compile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsed,
    Validated,
    MarkupCompiled,
    StylingCompiled,
    LogicCompiled,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Parsed => "parsed",
            Stage::Validated => "validated",
            Stage::MarkupCompiled => "markup-compiled",
            Stage::StylingCompiled => "styling-compiled",
            Stage::LogicCompiled => "logic-compiled",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a successful compile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOutput {
    /// Compiled logic with the compiled markup woven in
    pub code: String,
    /// Wrapped stylesheet export, when the document has a style section
    pub style: Option<String>,
}

/// Compiles documents against a fixed registry and configuration.
///
/// Cheap to clone; every clone shares the same read-only state.
#[derive(Clone)]
pub struct Pipeline {
    registry: Arc<CompilerRegistry>,
    options: Arc<PipelineOptions>,
    sink: Arc<dyn DiagnosticSink>,
    rules: Arc<RuleRegistry>,
}

impl Pipeline {
    pub fn new(registry: Arc<CompilerRegistry>, options: PipelineOptions) -> Self {
        Self {
            registry,
            options: Arc::new(options),
            sink: Arc::new(TracingSink),
            rules: Arc::new(RuleRegistry::new()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    pub fn registry(&self) -> &CompilerRegistry {
        &self.registry
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub(crate) fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    pub(crate) fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Parse, validate and classify without invoking any sub-compiler
    pub fn prepare(&self, source: &str) -> CompileResult<SectionSlots> {
        let tree = parse(source)?;
        debug!(stage = %Stage::Parsed, sections = tree.len());

        if !validate(&tree) {
            return Err(CompileError::Structural {
                count: markup_count(&tree),
            });
        }
        debug!(stage = %Stage::Validated);

        Ok(classify(tree))
    }

    /// Compile a document into its emitted artifact
    #[instrument(skip(self, source), fields(bytes = source.len()))]
    pub async fn compile(&self, source: &str, document_id: &str) -> CompileResult<CompileOutput> {
        info!("Starting compile");

        let result = self.run(SourceDocument { source, id: document_id }).await;
        match &result {
            Ok(output) => info!(stage = %Stage::Done, has_style = output.style.is_some(), "Compile complete"),
            Err(err) => warn!(stage = %Stage::Failed, error = %err, "Compile failed"),
        }
        result
    }

    async fn run(&self, document: SourceDocument<'_>) -> CompileResult<CompileOutput> {
        let slots = self.prepare(document.source)?;

        // Markup and styling don't depend on each other
        let markup = async {
            match &slots.markup {
                Some(section) => {
                    let compiled = markup::process(self, section, &document).await?;
                    debug!(stage = %Stage::MarkupCompiled, bytes = compiled.code.len());
                    Ok::<_, CompileError>(Some(compiled))
                }
                None => Ok(None),
            }
        };
        let styling = async {
            match &slots.styling {
                Some(section) => {
                    let compiled = styling::process(self, section, &document).await?;
                    debug!(stage = %Stage::StylingCompiled, bytes = compiled.code.len());
                    Ok::<_, CompileError>(Some(compiled))
                }
                None => Ok(None),
            }
        };
        let (markup, styling) = tokio::try_join!(markup, styling)?;

        let logic = logic::process(self, slots.logic.as_ref(), markup.as_ref(), &document).await?;
        debug!(stage = %Stage::LogicCompiled, bytes = logic.code.len());

        Ok(CompileOutput {
            code: logic.code,
            style: styling.map(|compiled| compiled.code),
        })
    }

    /// Compile section text with the capability registered for `language`.
    /// Without one the text is passed through minus its padding lines.
    pub(crate) async fn compile_section(
        &self,
        kind: SectionKind,
        language: Option<&str>,
        section: &SectionNode,
        text: &str,
        document: &SourceDocument<'_>,
    ) -> CompileResult<CompiledSection> {
        let Some((language, capability)) =
            language.and_then(|language| self.registry.lookup(language).map(|capability| (language, capability)))
        else {
            debug!(kind = %kind, language = ?language, "No capability registered, passing through");
            return Ok(CompiledSection::passthrough(text.trim_start_matches(['\n', '\r']), kind));
        };

        debug!(kind = %kind, language, "Compiling section");
        let ctx = CompileContext::new(kind, section, self.options.language_options(language));
        let compiled = capability
            .compile(text, &ctx, document.id)
            .await
            .map_err(|source| CompileError::sub_compiler(language, kind, source))?;

        Ok(CompiledSection::new(compiled.code, kind))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
