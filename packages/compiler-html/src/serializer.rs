use weave_parser::ast::*;

struct Context {
    buffer: String,
}

impl Context {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize markup nodes back to text.
///
/// Text, comments and attribute values are written exactly as parsed, so
/// markup that is already minimal serializes to itself.
pub fn serialize(nodes: &[MarkupNode]) -> String {
    let mut ctx = Context::new();
    for node in nodes {
        serialize_node(node, &mut ctx);
    }
    ctx.get_output()
}

fn serialize_node(node: &MarkupNode, ctx: &mut Context) {
    match node {
        MarkupNode::Element(element) => serialize_element(element, ctx),
        MarkupNode::Text(text) => ctx.add(&text.value),
        MarkupNode::Comment(comment) => {
            ctx.add("<!--");
            ctx.add(&comment.value);
            ctx.add("-->");
        }
    }
}

fn serialize_element(element: &Element, ctx: &mut Context) {
    ctx.add("<");
    ctx.add(&element.name);

    for attribute in &element.attributes {
        ctx.add(" ");
        serialize_attribute(attribute, ctx);
    }

    if element.self_closing {
        ctx.add("/>");
        return;
    }

    ctx.add(">");

    if element.is_void() {
        return;
    }

    for child in &element.children {
        serialize_node(child, ctx);
    }

    ctx.add("</");
    ctx.add(&element.name);
    ctx.add(">");
}

fn serialize_attribute(attribute: &Attribute, ctx: &mut Context) {
    ctx.add(&attribute.name);

    let Some(value) = &attribute.value else {
        return;
    };

    ctx.add("=");
    match attribute.quote {
        Quote::Double => {
            ctx.add("\"");
            ctx.add(value);
            ctx.add("\"");
        }
        Quote::Single => {
            ctx.add("'");
            ctx.add(value);
            ctx.add("'");
        }
        Quote::None => ctx.add(value),
    }
}
