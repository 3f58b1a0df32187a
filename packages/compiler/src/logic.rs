use crate::dedent::{dedent, pad_lines};
use crate::error::{CompileError, CompileResult};
use crate::pipeline::{Pipeline, SourceDocument};
use tracing::debug;
use weave_common::{CompiledSection, SectionKind};
use weave_parser::ast::SectionNode;

/// Weave the compiled markup into the logic section and compile the result
pub async fn process(
    pipeline: &Pipeline,
    section: Option<&SectionNode>,
    markup: Option<&CompiledSection>,
    document: &SourceDocument<'_>,
) -> CompileResult<CompiledSection> {
    let section = section.ok_or(CompileError::MissingLogic)?;
    let mut text = pad_lines(&section.raw, section.location.preceding_lines());

    let language = section
        .lang()
        .or(SectionKind::Logic.default_language())
        .unwrap_or_default();

    if let Some(markup) = markup {
        let injector = pipeline
            .registry()
            .lookup(language)
            .and_then(|capability| capability.injector())
            .ok_or_else(|| CompileError::MissingInject {
                language: language.to_string(),
            })?;

        debug!(language, markup_bytes = markup.code.len(), "Injecting compiled markup");
        text = injector
            .inject(&text, &markup.code)
            .map_err(|source| CompileError::sub_compiler(language, SectionKind::Logic, source))?;
    }

    let text = dedent(&text);
    pipeline
        .compile_section(SectionKind::Logic, Some(language), section, &text, document)
        .await
}
