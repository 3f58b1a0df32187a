use weave_common::SectionKind;
use weave_parser::ast::SectionTree;

/// Number of markup sections in the tree
pub fn markup_count(tree: &SectionTree) -> usize {
    tree.named(SectionKind::Markup.tag_name()).count()
}

/// A document may contain at most one markup section
pub fn validate(tree: &SectionTree) -> bool {
    markup_count(tree) <= 1
}
