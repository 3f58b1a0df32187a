use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use weave_compiler::{
    Capability, CapabilityError, CapabilityResult, CollectingSink, CompileContext, CompileError, CompiledSection,
    CompilerRegistry, Injector, MinifyOptions, Pipeline, PipelineConfig, PipelineOptions, PostProcessConfig,
    SectionKind, STYLE_INJECT_SYMBOL,
};

/// Records every source it is asked to compile
#[derive(Default)]
struct Recorder {
    language: &'static str,
    seen: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl Recorder {
    fn new(language: &'static str) -> Arc<Self> {
        Arc::new(Self {
            language,
            ..Default::default()
        })
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Capability for Recorder {
    fn language(&self) -> &str {
        self.language
    }

    async fn compile(
        &self,
        source: &str,
        ctx: &CompileContext<'_>,
        _document_id: &str,
    ) -> CapabilityResult<CompiledSection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(source.to_string());
        Ok(CompiledSection::new(source.trim(), ctx.kind))
    }
}

/// Fails on the first line containing `!error`, reporting that line
struct LineChecker;

#[async_trait]
impl Capability for LineChecker {
    fn language(&self) -> &str {
        "checked"
    }

    async fn compile(
        &self,
        source: &str,
        _ctx: &CompileContext<'_>,
        _document_id: &str,
    ) -> CapabilityResult<CompiledSection> {
        match source.lines().position(|line| line.contains("!error")) {
            Some(idx) => Err(CapabilityError::new("syntax error").with_line(idx as u32 + 1)),
            None => Ok(CompiledSection::new(source, SectionKind::Logic)),
        }
    }
}

/// Prepends markup as a comment
struct CommentInjector;

impl Injector for CommentInjector {
    fn inject(&self, logic: &str, markup: &str) -> CapabilityResult<String> {
        Ok(format!("/*{}*/{}", markup, logic))
    }
}

struct Woven;

#[async_trait]
impl Capability for Woven {
    fn language(&self) -> &str {
        "woven"
    }

    async fn compile(
        &self,
        source: &str,
        ctx: &CompileContext<'_>,
        _document_id: &str,
    ) -> CapabilityResult<CompiledSection> {
        Ok(CompiledSection::new(source.trim(), ctx.kind))
    }

    fn injector(&self) -> Option<&dyn Injector> {
        Some(&CommentInjector)
    }
}

fn builtin_pipeline() -> Pipeline {
    Pipeline::new(Arc::new(CompilerRegistry::builtin()), PipelineOptions::default())
}

#[tokio::test]
async fn end_to_end_template_and_script() {
    let source = "<template>\n  <div>{{x}}</div>\n</template>\n<script>\nexport default {}\n</script>\n";
    let options = PipelineOptions {
        minifier: MinifyOptions::recommended(),
        ..Default::default()
    };
    let pipeline = Pipeline::new(Arc::new(CompilerRegistry::builtin()), options);

    let output = pipeline.compile(source, "App.weave").await.expect("compile succeeds");

    assert_eq!(output.code, "export default {template: \"<div>{{x}}</div>\",}\n");
    assert_eq!(output.style, None);
}

#[tokio::test]
async fn template_is_woven_into_the_real_component() {
    let source = "<template><p>hi</p></template><script>\n// usage: export default {}\nexport default { name: 'A' }\n</script>";

    let output = builtin_pipeline().compile(source, "App.weave").await.unwrap();

    assert_eq!(
        output.code,
        "// usage: export default {}\nexport default {template: \"<p>hi</p>\", name: 'A' }\n"
    );
}

#[tokio::test]
async fn two_templates_fail_before_any_sub_compiler_runs() {
    let recorder = Recorder::new("js");
    let mut registry = CompilerRegistry::new();
    registry.register_as("js", recorder.clone());
    let pipeline = Pipeline::new(Arc::new(registry), PipelineOptions::default());

    let source = "<template><a></a></template>\n<template><b></b></template>\n<script>export default {}</script>";
    let err = pipeline.compile(source, "App.weave").await.unwrap_err();

    assert!(err.is_structural());
    assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn styling_processor_receives_last_style_section() {
    let css = Recorder::new("css");
    let mut registry = CompilerRegistry::new();
    registry.register_as("css", css.clone());
    let pipeline = Pipeline::new(Arc::new(registry), PipelineOptions::default());

    let source = "<style>.first { color: red }</style>\n<script>x</script>\n<style>.second { color: blue }</style>";
    let output = pipeline.compile(source, "App.weave").await.unwrap();

    let seen = css.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], "\n\n.second { color: blue }");
    assert_eq!(
        output.style.as_deref(),
        Some(r#"export default __weave_inject_style__(".second { color: blue }");"#)
    );
    assert!(output.style.unwrap().contains(STYLE_INJECT_SYMBOL));
}

#[tokio::test]
async fn markup_round_trips_with_noop_minifier() {
    let markup = r#"<section class="card"><h1 title='t'>{{ title }}</h1><!-- keep --><p>a  b</p><br><input disabled></section>"#;
    let source = format!("<template>\n  {}\n</template>\n<script>export default {{}}</script>", markup);

    let output = builtin_pipeline().compile(&source, "App.weave").await.unwrap();

    let expected = serde_json::to_string(markup).unwrap();
    assert_eq!(output.code, format!("export default {{template: {},}}\n", expected));
}

#[tokio::test]
async fn non_html_markup_survives_noop_minifier() {
    let mut registry = CompilerRegistry::builtin();
    registry.register_as("render", Recorder::new("render"));
    let pipeline = Pipeline::new(Arc::new(registry), PipelineOptions::default());

    let source = "<template lang=\"render\">h('p', '</b>')</template><script>export default {}</script>";
    let output = pipeline.compile(source, "App.weave").await.unwrap();

    assert_eq!(output.code, "export default {template: \"h('p', '</b>')\",}\n");
}

#[tokio::test]
async fn logic_errors_report_document_lines() {
    let mut registry = CompilerRegistry::new();
    registry.register(LineChecker);
    let pipeline = Pipeline::new(Arc::new(registry), PipelineOptions::default());

    let source = "<style>\n.a {}\n</style>\n\n<script lang=\"checked\">\nlet a = 1;\n!error\n</script>\n";
    let err = pipeline.compile(source, "App.weave").await.unwrap_err();

    match err {
        CompileError::SubCompiler { language, kind, source } => {
            assert_eq!(language, "checked");
            assert_eq!(kind, SectionKind::Logic);
            assert_eq!(source.line, Some(7));
        }
        other => panic!("expected sub-compiler error, got {:?}", other),
    }
}

#[tokio::test]
async fn builtin_js_reports_document_line() {
    let source = "<template>\n  <p>hi</p>\n</template>\n\n<script>\nexport default {\n  data() { return { a: 1 }\n}\n</script>\n";

    let err = builtin_pipeline().compile(source, "App.weave").await.unwrap_err();

    assert!(matches!(err, CompileError::SubCompiler { ref language, .. } if language == "js"));
    // The unclosed brace opens on line 6 of the document
    assert_eq!(err.line(), Some(6));
}

#[tokio::test]
async fn default_languages_are_used_without_lang() {
    let js = Recorder::new("js");
    let css = Recorder::new("css");
    let mut registry = CompilerRegistry::new();
    registry.register_as("js", js.clone());
    registry.register_as("css", css.clone());
    let pipeline = Pipeline::new(Arc::new(registry), PipelineOptions::default());

    pipeline
        .compile("<script>let a</script><style>.a{}</style>", "App.weave")
        .await
        .unwrap();

    assert_eq!(js.seen(), vec!["let a"]);
    assert_eq!(css.seen(), vec![".a{}"]);
}

#[tokio::test]
async fn unregistered_languages_pass_through() {
    let pipeline = Pipeline::new(Arc::new(CompilerRegistry::new()), PipelineOptions::default());

    let output = pipeline
        .compile("<script lang=\"ts\">\n  let a: number = 1\n</script>\n<style lang=\"scss\">$x: 1;</style>", "App.weave")
        .await
        .unwrap();

    assert_eq!(output.code, "let a: number = 1\n");
    assert_eq!(output.style.as_deref(), Some(r#"export default __weave_inject_style__("$x: 1;");"#));
}

#[tokio::test]
async fn injection_without_injector_names_language() {
    let mut registry = CompilerRegistry::builtin();
    registry.register_as("ts", Recorder::new("ts"));
    let pipeline = Pipeline::new(Arc::new(registry), PipelineOptions::default());

    let source = "<template><div></div></template><script lang=\"ts\">export default {}</script>";
    let err = pipeline.compile(source, "App.weave").await.unwrap_err();

    assert!(matches!(err, CompileError::MissingInject { ref language } if language == "ts"));
    assert!(err.to_string().contains("'ts'"));
}

#[tokio::test]
async fn injection_into_unregistered_language_fails() {
    let source = "<template><div></div></template><script lang=\"coffee\">x</script>";

    let err = builtin_pipeline().compile(source, "App.weave").await.unwrap_err();

    assert!(matches!(err, CompileError::MissingInject { ref language } if language == "coffee"));
}

#[tokio::test]
async fn custom_injector_runs_before_compile() {
    let pipeline = Pipeline::new(Arc::new(CompilerRegistry::new().with(Woven)), PipelineOptions::default());

    let source = "<template><b>x</b></template><script lang=\"woven\">run()</script>";
    let output = pipeline.compile(source, "App.weave").await.unwrap();

    assert_eq!(output.code, "/*<b>x</b>*/run()");
}

#[tokio::test]
async fn missing_script_is_an_error() {
    let err = builtin_pipeline()
        .compile("<template><p>x</p></template>", "App.weave")
        .await
        .unwrap_err();

    assert!(matches!(err, CompileError::MissingLogic));
}

#[tokio::test]
async fn lint_findings_go_to_the_sink() {
    let sink = Arc::new(CollectingSink::new());
    let pipeline = builtin_pipeline().with_sink(sink.clone());

    let source = "<template>\n  <img src=\"a.png\">\n</template>\n<script>export default {}</script>";
    let output = pipeline.compile(source, "src/App.weave").await;

    assert!(output.is_ok());
    let reports = sink.take();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, "src/App.weave");
    assert_eq!(reports[0].1.rule, "a11y-img-alt");
    assert_eq!(reports[0].1.location.line, 2);
}

#[tokio::test]
async fn configured_post_processing_runs() {
    let config = PipelineConfig {
        minifier: MinifyOptions::none(),
        post_processing: PostProcessConfig {
            plugins: vec!["minify".to_string()],
            ..Default::default()
        },
        ..Default::default()
    };
    let pipeline = Pipeline::new(Arc::new(CompilerRegistry::builtin()), config.into_options().unwrap());

    let source = "<script>export default {}</script>\n<style>\n  .a {\n    margin: 0px;\n  }\n</style>";
    let output = pipeline.compile(source, "App.weave").await.unwrap();

    assert_eq!(
        output.style.as_deref(),
        Some(r#"export default __weave_inject_style__(".a{margin:0}");"#)
    );
}

#[tokio::test]
async fn one_pipeline_serves_concurrent_compiles() {
    let pipeline = builtin_pipeline();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                let source = format!("<template><p>{}</p></template><script>export default {{}}</script>", i);
                pipeline.compile(&source, &format!("doc{}.weave", i)).await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let output = handle.await.unwrap().unwrap();
        assert!(output.code.contains(&format!("<p>{}</p>", i)));
    }
}
