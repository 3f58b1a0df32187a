use weave_parser::ast::*;

/// Visitor pattern for traversing markup nodes immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_nodes(&mut self, nodes: &[MarkupNode]) {
        walk_nodes(self, nodes);
    }

    fn visit_node(&mut self, node: &MarkupNode) {
        walk_node(self, node);
    }

    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_attribute(&mut self, _element: &Element, _attribute: &Attribute) {
        // Leaf node, no children to walk
    }

    fn visit_text(&mut self, _text: &TextNode) {
        // Leaf node, no children to walk
    }

    fn visit_comment(&mut self, _comment: &CommentNode) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor pattern for transforming markup nodes
///
/// Similar to Visitor, but provides mutable access to nodes.
/// Use this when you need to modify the tree during traversal.
pub trait VisitorMut: Sized {
    fn visit_nodes_mut(&mut self, nodes: &mut Vec<MarkupNode>) {
        walk_nodes_mut(self, nodes);
    }

    fn visit_element_mut(&mut self, element: &mut Element) {
        walk_element_mut(self, element);
    }

    fn visit_text_mut(&mut self, _text: &mut TextNode) {
        // Leaf node, no children to walk
    }

    fn visit_comment_mut(&mut self, _comment: &mut CommentNode) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations for immutable visitor

pub fn walk_nodes<V: Visitor>(visitor: &mut V, nodes: &[MarkupNode]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &MarkupNode) {
    match node {
        MarkupNode::Element(element) => visitor.visit_element(element),
        MarkupNode::Text(text) => visitor.visit_text(text),
        MarkupNode::Comment(comment) => visitor.visit_comment(comment),
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    for attribute in &element.attributes {
        visitor.visit_attribute(element, attribute);
    }
    visitor.visit_nodes(&element.children);
}

// Default walk implementations for mutable visitor

pub fn walk_nodes_mut<V: VisitorMut>(visitor: &mut V, nodes: &mut Vec<MarkupNode>) {
    for node in nodes.iter_mut() {
        match node {
            MarkupNode::Element(element) => visitor.visit_element_mut(element),
            MarkupNode::Text(text) => visitor.visit_text_mut(text),
            MarkupNode::Comment(comment) => visitor.visit_comment_mut(comment),
        }
    }
}

pub fn walk_element_mut<V: VisitorMut>(visitor: &mut V, element: &mut Element) {
    visitor.visit_nodes_mut(&mut element.children);
}
