use logos::{Lexer, Logos};
use std::fmt;

/// Tokens recognised between tags
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum ContentToken<'src> {
    // `<!-- ... -->`, payload excludes the delimiters
    #[token("<!--", lex_comment)]
    Comment(&'src str),

    // `<!DOCTYPE html>` and friends, kept verbatim
    #[regex(r"<![a-zA-Z][^>]*>", |lex| lex.slice())]
    Declaration(&'src str),

    #[regex(r"<[a-zA-Z][a-zA-Z0-9_:.\-]*", |lex| &lex.slice()[1..])]
    OpenTag(&'src str),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9_:.\-]*", |lex| &lex.slice()[2..])]
    CloseTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    // A `<` that does not start a tag is plain text
    #[token("<", |lex| lex.slice())]
    LessThan(&'src str),
}

fn lex_comment<'src>(lex: &mut Lexer<'src, ContentToken<'src>>) -> Option<&'src str> {
    let end = lex.remainder().find("-->")?;
    lex.bump(end + 3);
    let slice = lex.slice();
    Some(&slice[4..slice.len() - 3])
}

/// Tokens recognised inside `<name ...>`
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TagToken<'src> {
    #[token(">")]
    End,

    #[token("/>")]
    SelfClosingEnd,

    #[token("/")]
    Slash,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    DoubleQuoted(&'src str),

    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    SingleQuoted(&'src str),

    // Attribute names (`:class`, `@click`, `v-if`)
    #[regex(r#"[^ \t\r\n\f"'<>=/]+"#, |lex| lex.slice())]
    Name(&'src str),
}

impl<'src> fmt::Display for ContentToken<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentToken::Comment(_) => write!(f, "comment"),
            ContentToken::Declaration(d) => write!(f, "declaration {}", d),
            ContentToken::OpenTag(name) => write!(f, "<{}", name),
            ContentToken::CloseTag(name) => write!(f, "</{}", name),
            ContentToken::Text(_) => write!(f, "text"),
            ContentToken::LessThan(_) => write!(f, "'<'"),
        }
    }
}

impl<'src> fmt::Display for TagToken<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagToken::End => write!(f, "'>'"),
            TagToken::SelfClosingEnd => write!(f, "'/>'"),
            TagToken::Slash => write!(f, "'/'"),
            TagToken::Equals => write!(f, "'='"),
            TagToken::DoubleQuoted(s) => write!(f, "string \"{}\"", s),
            TagToken::SingleQuoted(s) => write!(f, "string '{}'", s),
            TagToken::Name(n) => write!(f, "name '{}'", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<(ContentToken, std::ops::Range<usize>)> {
        ContentToken::lexer(source)
            .spanned()
            .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
            .collect()
    }

    #[test]
    fn test_content_tokens() {
        let tokens = tokenize("<div>{{x}}</div>");

        assert_eq!(tokens[0].0, ContentToken::OpenTag("div"));
        assert_eq!(tokens[1].0, ContentToken::Text(">{{x}}"));
        assert_eq!(tokens[2].0, ContentToken::CloseTag("div"));
        assert_eq!(tokens[3].0, ContentToken::Text(">"));
    }

    #[test]
    fn test_comment_payload() {
        let tokens = tokenize("<!-- hello -->rest");

        assert_eq!(tokens[0].0, ContentToken::Comment(" hello "));
        assert_eq!(tokens[0].1, 0..14);
        assert_eq!(tokens[1].0, ContentToken::Text("rest"));
    }

    #[test]
    fn test_unterminated_comment_is_error() {
        let mut lexer = ContentToken::lexer("<!-- never closed");
        assert_eq!(lexer.next(), Some(Err(())));
    }

    #[test]
    fn test_lone_less_than() {
        let tokens = tokenize("a < b");

        assert_eq!(tokens[0].0, ContentToken::Text("a "));
        assert_eq!(tokens[1].0, ContentToken::LessThan("<"));
        assert_eq!(tokens[2].0, ContentToken::Text(" b"));
    }

    #[test]
    fn test_tag_tokens() {
        let tokens: Vec<_> = TagToken::lexer(r#" lang="ts" scoped :class='a' v-if=ok />"#)
            .filter_map(Result::ok)
            .collect();

        assert_eq!(
            tokens,
            vec![
                TagToken::Name("lang"),
                TagToken::Equals,
                TagToken::DoubleQuoted("ts"),
                TagToken::Name("scoped"),
                TagToken::Name(":class"),
                TagToken::Equals,
                TagToken::SingleQuoted("a"),
                TagToken::Name("v-if"),
                TagToken::Equals,
                TagToken::Name("ok"),
                TagToken::SelfClosingEnd,
            ]
        );
    }
}
