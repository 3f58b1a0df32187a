use crate::dedent::dedent;
use crate::error::CompileResult;
use crate::pipeline::{Pipeline, SourceDocument};
use tracing::debug;
use weave_common::{CompiledSection, SectionKind};
use weave_compiler_html::minify;
use weave_linter::lint_section;
use weave_parser::ast::SectionNode;

/// Compile the markup section into minified markup.
///
/// Un-`lang`ed markup is linted first. Findings go to the pipeline's
/// diagnostic sink and never fail the compile.
pub async fn process(
    pipeline: &Pipeline,
    section: &SectionNode,
    document: &SourceDocument<'_>,
) -> CompileResult<CompiledSection> {
    let text = dedent(&section.raw);
    let text = text.trim_start_matches(['\n', '\r']).trim_end();

    let language = section.lang();
    if language.is_none() && pipeline.options().lint {
        let diagnostics = lint_section(section, document.source, pipeline.rules());
        if !diagnostics.is_empty() {
            debug!(count = diagnostics.len(), "Markup lint findings");
            pipeline.sink().report(document.id, &diagnostics);
        }
    }

    let language = language.or(SectionKind::Markup.default_language());
    let compiled = pipeline
        .compile_section(SectionKind::Markup, language, section, text, document)
        .await?;

    let code = minify(&compiled.code, &pipeline.options().minifier)?;
    Ok(CompiledSection::new(code, SectionKind::Markup))
}
