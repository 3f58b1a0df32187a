use weave_parser::{parse, Location, MarkupNode, SectionContent};

const COUNTER: &str = r#"<!-- Counter component -->
<template>
  <div class="counter">
    <button @click="count--" :disabled="count <= 0">-</button>
    <span>{{ count }}</span>
    <button @click="count++">+</button>
  </div>
</template>

<script lang="ts">
export default {
  data() {
    return { count: 0 };
  },
};
</script>

<style scoped>
.counter > span { font-weight: bold; }
</style>
"#;

#[test]
fn test_counter_component() {
    let tree = parse(COUNTER).expect("Failed to parse");

    let names: Vec<_> = tree.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["template", "script", "style"]);

    let template = &tree.nodes[0];
    let div = template
        .children()
        .iter()
        .find_map(MarkupNode::as_element)
        .expect("Expected a root element");
    assert_eq!(div.name, "div");

    let buttons: Vec<_> = div
        .children
        .iter()
        .filter_map(MarkupNode::as_element)
        .filter(|e| e.name == "button")
        .collect();
    assert_eq!(buttons.len(), 2);
    assert_eq!(
        buttons[0].attr(":disabled").and_then(|a| a.value.as_deref()),
        Some("count <= 0")
    );
}

#[test]
fn test_section_locations_follow_the_document() {
    let tree = parse(COUNTER).expect("Failed to parse");

    assert_eq!(tree.nodes[0].location, Location::new(2, 11));
    assert_eq!(tree.nodes[1].location, Location::new(10, 19));
    assert_eq!(tree.nodes[2].location, Location::new(18, 15));

    for node in &tree.nodes {
        assert_eq!(&COUNTER[node.content_span.start..node.content_span.end], node.raw);
    }
}

#[test]
fn test_script_content_is_verbatim() {
    let tree = parse(COUNTER).expect("Failed to parse");

    match &tree.nodes[1].content {
        SectionContent::Text(text) => assert!(text.contains("return { count: 0 };")),
        other => panic!("Expected raw text, got {:?}", other),
    }
}

#[test]
fn test_crlf_line_endings() {
    let source = "<template>\r\n  <p>x</p>\r\n</template>\r\n<script>\r\nlet a\r\n</script>\r\n";
    let tree = parse(source).expect("Failed to parse");

    assert_eq!(tree.nodes[1].location.line, 4);
    assert_eq!(tree.nodes[1].raw, "\r\nlet a\r\n");
}
