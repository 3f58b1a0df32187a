pub mod ast;
pub mod error;
pub mod location;
pub mod parser;
pub mod tokenizer;


pub use ast::{
    Attribute, CommentNode, Element, Location, MarkupNode, Quote, SectionContent, SectionNode,
    SectionTree, Span, TextNode,
};
pub use error::{ParseError, ParseResult};
pub use location::{line_start_offset, offset_to_location};
pub use parser::{parse, parse_fragment, Parser};
pub use tokenizer::{ContentToken, TagToken};
