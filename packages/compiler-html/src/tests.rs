use crate::{minify, MinifyError, MinifyOptions};

fn options(f: impl FnOnce(&mut MinifyOptions)) -> MinifyOptions {
    let mut options = MinifyOptions::none();
    f(&mut options);
    options
}

#[test]
fn test_noop_minify_round_trips() {
    let markup = r#"<div class="a" id='b' data-x=1 hidden><br><img src="x.png"/><!-- c --><p>  a  <b>b</b></p></div>"#;

    let output = minify(markup, &MinifyOptions::none()).expect("Failed to minify");

    assert_eq!(output, markup);
}

#[test]
fn test_noop_keeps_entities_and_interpolation() {
    let markup = "<p title=\"a &amp; b\">{{ user.name }} &lt;3</p>";
    assert_eq!(minify(markup, &MinifyOptions::none()).unwrap(), markup);
}

#[test]
fn test_collapse_whitespace() {
    let markup = "<div>\n  <p>Hello   world</p>\n  <span>a</span> <span>b</span>\n</div>";

    let output = minify(markup, &options(|o| o.collapse_whitespace = true)).expect("Failed to minify");

    assert_eq!(output, "<div><p>Hello world</p><span>a</span> <span>b</span></div>");
}

#[test]
fn test_collapse_whitespace_preserves_pre_and_raw_text() {
    let opts = options(|o| o.collapse_whitespace = true);

    let output = minify("<div> <pre>  a\n  b </pre> </div>", &opts).unwrap();
    assert_eq!(output, "<div><pre>  a\n  b </pre></div>");

    let output = minify("<div> <script>  let a  =  1 </script> </div>", &opts).unwrap();
    assert_eq!(output, "<div><script>  let a  =  1 </script></div>");
}

#[test]
fn test_remove_comments() {
    let output = minify("<p>a<!-- x -->b</p>", &options(|o| o.remove_comments = true)).unwrap();
    assert_eq!(output, "<p>ab</p>");
}

#[test]
fn test_attribute_rewrites() {
    let markup = r#"<input disabled="disabled" checked="" type="text" value="a b">"#;
    let opts = options(|o| {
        o.collapse_boolean_attributes = true;
        o.remove_attribute_quotes = true;
    });

    let output = minify(markup, &opts).unwrap();

    assert_eq!(output, r#"<input disabled checked type=text value="a b">"#);
}

#[test]
fn test_recommended_keeps_interpolation() {
    let output = minify("<div>{{ user.name }}</div>", &MinifyOptions::recommended()).unwrap();
    assert_eq!(output, "<div>{{ user.name }}</div>");
}

#[test]
fn test_malformed_markup_is_an_error() {
    let err = minify("<div><span></div>", &MinifyOptions::recommended()).unwrap_err();
    assert!(matches!(err, MinifyError::Parse(_)));
}

#[test]
fn test_noop_leaves_non_html_output_alone() {
    let compiled = "h('div', [h('span')])</p>";
    assert_eq!(minify(compiled, &MinifyOptions::none()).unwrap(), compiled);
}

#[test]
fn test_options_deserialize_with_defaults() {
    let opts: MinifyOptions = serde_json::from_str(r#"{"collapseWhitespace": true}"#).unwrap();

    assert!(opts.collapse_whitespace);
    assert!(!opts.remove_comments);
    assert!(!opts.is_noop());
    assert!(MinifyOptions::default().is_noop());
}
