use std::ops::Range;
use weave_common::{CapabilityError, CapabilityResult};

/// Cursor over script text tracking 1-based line and column, and the byte
/// offset just past the last char
struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
    column: u32,
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 0,
            offset: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn position(&self) -> (u32, u32) {
        (self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Brace,
    Paren,
    Bracket,
    /// `${` inside a template literal
    Substitution,
}

/// Check that delimiters, strings, template literals and comments balance.
///
/// Errors carry the 1-based line and column in `source`.
pub fn check_script(source: &str) -> CapabilityResult<()> {
    let mut cursor = Cursor::new(source);
    let mut stack: Vec<(Open, u32, u32)> = Vec::new();
    // Last significant character, used to tell a regex literal from division
    let mut prev: Option<char> = None;

    while let Some(ch) = cursor.bump() {
        let (line, column) = cursor.position();

        match ch {
            c if c.is_whitespace() => continue,
            '/' if cursor.peek() == Some('/') => {
                while let Some(c) = cursor.peek() {
                    if c == '\n' {
                        break;
                    }
                    cursor.bump();
                }
                continue;
            }
            '/' if cursor.peek() == Some('*') => {
                cursor.bump();
                let mut last = '\0';
                let mut closed = false;
                while let Some(c) = cursor.bump() {
                    if last == '*' && c == '/' {
                        closed = true;
                        break;
                    }
                    last = c;
                }
                if !closed {
                    return Err(CapabilityError::at("Unterminated comment", line, column));
                }
                continue;
            }
            '/' if starts_regex(prev) => skip_regex(&mut cursor, line, column)?,
            '"' | '\'' => skip_string(&mut cursor, ch, line, column)?,
            '`' => {
                if skip_template(&mut cursor, line, column)? {
                    stack.push((Open::Substitution, line, column));
                }
            }
            '{' => stack.push((Open::Brace, line, column)),
            '(' => stack.push((Open::Paren, line, column)),
            '[' => stack.push((Open::Bracket, line, column)),
            '}' | ')' | ']' => {
                let top = stack.pop();
                match (ch, top) {
                    ('}', Some((Open::Brace, _, _))) | (')', Some((Open::Paren, _, _))) | (']', Some((Open::Bracket, _, _))) => {}
                    ('}', Some((Open::Substitution, open_line, open_column))) => {
                        // Back inside the template literal
                        if skip_template(&mut cursor, open_line, open_column)? {
                            stack.push((Open::Substitution, open_line, open_column));
                        }
                    }
                    _ => return Err(CapabilityError::at(format!("Unexpected '{}'", ch), line, column)),
                }
            }
            _ => {}
        }

        prev = Some(ch);
    }

    match stack.pop() {
        Some((Open::Substitution, line, column)) => {
            Err(CapabilityError::at("Unterminated template literal", line, column))
        }
        Some((open, line, column)) => {
            let ch = match open {
                Open::Brace => '{',
                Open::Paren => '(',
                _ => '[',
            };
            Err(CapabilityError::at(format!("Unclosed '{}'", ch), line, column))
        }
        None => Ok(()),
    }
}

/// Blank out comments, string, template and regex literals with spaces.
///
/// The result has the same byte length as `source`, so offsets found in it
/// apply to `source`. Unterminated literals are blanked to the end.
pub(crate) fn mask_literals(source: &str) -> String {
    let mut masked = String::with_capacity(source.len());
    let mut copied = 0;
    for range in literal_ranges(source) {
        masked.push_str(&source[copied..range.start]);
        masked.extend(std::iter::repeat(' ').take(range.len()));
        copied = range.end;
    }
    masked.push_str(&source[copied..]);
    masked
}

fn literal_ranges(source: &str) -> Vec<Range<usize>> {
    let mut cursor = Cursor::new(source);
    let mut ranges = Vec::new();
    // `true` marks a `${` substitution, `false` a plain brace
    let mut braces: Vec<bool> = Vec::new();
    let mut prev: Option<char> = None;

    while let Some(ch) = cursor.bump() {
        let (line, column) = cursor.position();
        let start = cursor.offset - ch.len_utf8();

        match ch {
            c if c.is_whitespace() => continue,
            '/' if cursor.peek() == Some('/') => {
                while cursor.peek().is_some_and(|c| c != '\n') {
                    cursor.bump();
                }
                ranges.push(start..cursor.offset);
                continue;
            }
            '/' if cursor.peek() == Some('*') => {
                cursor.bump();
                let mut last = '\0';
                while let Some(c) = cursor.bump() {
                    if last == '*' && c == '/' {
                        break;
                    }
                    last = c;
                }
                ranges.push(start..cursor.offset);
                continue;
            }
            '/' if starts_regex(prev) => {
                let _ = skip_regex(&mut cursor, line, column);
                ranges.push(start..cursor.offset);
            }
            '"' | '\'' => {
                let _ = skip_string(&mut cursor, ch, line, column);
                ranges.push(start..cursor.offset);
            }
            '`' => {
                if skip_template(&mut cursor, line, column).unwrap_or(false) {
                    braces.push(true);
                }
                ranges.push(start..cursor.offset);
            }
            '{' => braces.push(false),
            '}' if braces.pop() == Some(true) => {
                if skip_template(&mut cursor, line, column).unwrap_or(false) {
                    braces.push(true);
                }
                ranges.push(start..cursor.offset);
            }
            _ => {}
        }

        prev = Some(ch);
    }

    ranges
}

fn starts_regex(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => "(,=:[!&|?{};+-*%<>~^".contains(c),
    }
}

fn skip_string(cursor: &mut Cursor<'_>, quote: char, line: u32, column: u32) -> CapabilityResult<()> {
    while let Some(c) = cursor.bump() {
        match c {
            '\\' => {
                cursor.bump();
            }
            '\n' => break,
            c if c == quote => return Ok(()),
            _ => {}
        }
    }
    Err(CapabilityError::at("Unterminated string", line, column))
}

fn skip_regex(cursor: &mut Cursor<'_>, line: u32, column: u32) -> CapabilityResult<()> {
    let mut in_class = false;
    while let Some(c) = cursor.bump() {
        match c {
            '\\' => {
                cursor.bump();
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => return Ok(()),
            '\n' => break,
            _ => {}
        }
    }
    Err(CapabilityError::at("Unterminated regular expression", line, column))
}

/// Skip template literal text. Returns `true` when a `${` substitution was
/// opened, `false` at the closing backtick.
fn skip_template(cursor: &mut Cursor<'_>, line: u32, column: u32) -> CapabilityResult<bool> {
    while let Some(c) = cursor.bump() {
        match c {
            '\\' => {
                cursor.bump();
            }
            '`' => return Ok(false),
            '$' if cursor.peek() == Some('{') => {
                cursor.bump();
                return Ok(true);
            }
            _ => {}
        }
    }
    Err(CapabilityError::at("Unterminated template literal", line, column))
}
