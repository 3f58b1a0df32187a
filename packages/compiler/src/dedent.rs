/// Strip the leading whitespace shared by every non-blank line.
///
/// Relative indentation and the number of lines are preserved; blank lines
/// become empty.
pub fn dedent(text: &str) -> String {
    let common = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[common.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix `text` with one newline per preceding document line so positions
/// reported against it match the document
pub fn pad_lines(text: &str, preceding_lines: usize) -> String {
    let mut padded = String::with_capacity(text.len() + preceding_lines);
    for _ in 0..preceding_lines {
        padded.push('\n');
    }
    padded.push_str(text);
    padded
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map(|((idx, ch), _)| idx + ch.len_utf8())
        .unwrap_or(0);
    &a[..len]
}
