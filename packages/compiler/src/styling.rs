use crate::dedent::pad_lines;
use crate::error::CompileResult;
use crate::pipeline::{Pipeline, SourceDocument};
use crate::postprocess::run_chain;
use weave_common::{CompiledSection, SectionKind};
use weave_parser::ast::SectionNode;

/// Runtime function the host provides to apply a compiled stylesheet
pub const STYLE_INJECT_SYMBOL: &str = "__weave_inject_style__";

/// Compile the style section into an exported injection call
pub async fn process(
    pipeline: &Pipeline,
    section: &SectionNode,
    document: &SourceDocument<'_>,
) -> CompileResult<CompiledSection> {
    let text = pad_lines(&section.raw, section.location.preceding_lines());

    let language = section.lang().or(SectionKind::Styling.default_language());
    let compiled = pipeline
        .compile_section(SectionKind::Styling, language, section, &text, document)
        .await?;

    let css = run_chain(&pipeline.options().post_processing, compiled.code, document.id).await?;

    Ok(CompiledSection::new(wrap_stylesheet(&css)?, SectionKind::Styling))
}

fn wrap_stylesheet(css: &str) -> CompileResult<String> {
    Ok(format!("export default {}({});", STYLE_INJECT_SYMBOL, serde_json::to_string(css)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_escapes_stylesheet() {
        assert_eq!(
            wrap_stylesheet(".a::before { content: \"x\" }\n").unwrap(),
            r#"export default __weave_inject_style__(".a::before { content: \"x\" }\n");"#
        );
    }
}
