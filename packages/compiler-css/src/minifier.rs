//! CSS minification - compress stylesheets for smaller payloads

/// Minify a stylesheet.
///
/// Removes comments and insignificant whitespace, drops the last `;` of each
/// block and shortens zero lengths and hex colors inside declaration values.
/// String contents are copied verbatim.
pub fn minify_stylesheet(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut word = String::new();
    let mut pending_space = false;
    let mut in_value = false;
    let mut chars = css.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                flush_word(&mut out, &mut word, in_value);
                pending_space = true;
            }
            c if c.is_whitespace() => {
                flush_word(&mut out, &mut word, in_value);
                pending_space = true;
            }
            '"' | '\'' => {
                flush_word(&mut out, &mut word, in_value);
                push_separated(&mut out, ch, &mut pending_space);
                while let Some(c) = chars.next() {
                    out.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if c == ch {
                        break;
                    }
                }
            }
            '{' | '}' | ';' | ':' | ',' | '>' | '~' | '(' | ')' => {
                flush_word(&mut out, &mut word, in_value);
                if ch == '}' && out.ends_with(';') {
                    out.pop();
                }
                push_separated(&mut out, ch, &mut pending_space);
                match ch {
                    ':' => in_value = true,
                    '{' | '}' | ';' => in_value = false,
                    _ => {}
                }
            }
            _ => {
                if word.is_empty() && pending_space && needs_space_before(&out) {
                    out.push(' ');
                }
                pending_space = false;
                word.push(ch);
            }
        }
    }

    flush_word(&mut out, &mut word, in_value);
    out.trim().to_string()
}

/// Push a delimiter, emitting the pending space only where it is significant
fn push_separated(out: &mut String, ch: char, pending_space: &mut bool) {
    if *pending_space && needs_space_before(out) && !is_tight(ch) {
        out.push(' ');
    }
    *pending_space = false;
    out.push(ch);
}

fn needs_space_before(out: &str) -> bool {
    match out.chars().last() {
        None => false,
        Some(last) => !matches!(last, '{' | '}' | ';' | ':' | ',' | '>' | '~' | '('),
    }
}

/// Delimiters that never need a space before them
fn is_tight(ch: char) -> bool {
    matches!(ch, '{' | '}' | ';' | ',' | '>' | '~' | ')')
}

fn flush_word(out: &mut String, word: &mut String, in_value: bool) {
    if word.is_empty() {
        return;
    }
    if in_value {
        out.push_str(&minify_css_value(word));
    } else {
        out.push_str(word);
    }
    word.clear();
}

/// Minify a single value token
fn minify_css_value(value: &str) -> String {
    // Zero lengths don't need a unit
    for unit in ["px", "em", "rem", "pt", "vh", "vw"] {
        if let Some(number) = value.strip_suffix(unit) {
            if !number.is_empty() && number.chars().all(|c| c == '0' || c == '.') && number.contains('0') {
                return "0".to_string();
            }
        }
    }

    // Colors: #ffffff -> #fff
    if let Some(hex) = value.strip_prefix('#') {
        let bytes = hex.as_bytes();
        if bytes.len() == 6
            && bytes.iter().all(u8::is_ascii_hexdigit)
            && bytes[0].eq_ignore_ascii_case(&bytes[1])
            && bytes[2].eq_ignore_ascii_case(&bytes[3])
            && bytes[4].eq_ignore_ascii_case(&bytes[5])
        {
            let short: String = [bytes[0], bytes[2], bytes[4]]
                .iter()
                .map(|b| b.to_ascii_lowercase() as char)
                .collect();
            return format!("#{}", short);
        }
    }

    // Leading zero: 0.5em -> .5em
    if let Some(rest) = value.strip_prefix("0.") {
        return format!(".{}", rest);
    }
    if let Some(rest) = value.strip_prefix("-0.") {
        return format!("-.{}", rest);
    }

    value.to_string()
}

/// Calculate compression ratio
pub fn calculate_compression_ratio(original_size: usize, minified_size: usize) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (original_size.saturating_sub(minified_size) as f64 / original_size as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_zero_values() {
        assert_eq!(minify_css_value("0px"), "0");
        assert_eq!(minify_css_value("0em"), "0");
        assert_eq!(minify_css_value("0.0rem"), "0");
        assert_eq!(minify_css_value("10px"), "10px"); // Don't touch non-zero
    }

    #[test]
    fn test_minify_colors() {
        assert_eq!(minify_css_value("#ffffff"), "#fff");
        assert_eq!(minify_css_value("#AABBCC"), "#abc");
        assert_eq!(minify_css_value("#123456"), "#123456"); // Don't touch non-minifiable
    }

    #[test]
    fn test_minify_leading_zero() {
        assert_eq!(minify_css_value("0.5em"), ".5em");
        assert_eq!(minify_css_value("-0.25s"), "-.25s");
    }

    #[test]
    fn test_minify_rule() {
        let css = "\n.foo > .bar {\n  padding: 0px;\n  margin: 10px  20px;\n  color: #ffffff;\n}\n";
        assert_eq!(minify_stylesheet(css), ".foo>.bar{padding:0;margin:10px 20px;color:#fff}");
    }

    #[test]
    fn test_minify_keeps_descendant_pseudo_and_strings() {
        let css = ".a :hover { content: \"  a ; b  \" } /* gone */ .b:focus{}";
        assert_eq!(minify_stylesheet(css), ".a :hover{content:\"  a ; b  \"}.b:focus{}");
    }

    #[test]
    fn test_minify_at_rules() {
        let css = "@media screen and (min-width: 10px) {\n  .a { margin: 0 auto; }\n}";
        assert_eq!(minify_stylesheet(css), "@media screen and (min-width:10px){.a{margin:0 auto}}");
    }

    #[test]
    fn test_minify_calc_keeps_operators() {
        let css = ".a { width: calc(100% - 20px); }";
        assert_eq!(minify_stylesheet(css), ".a{width:calc(100% - 20px)}");
    }

    #[test]
    fn test_selector_ids_are_not_colors() {
        assert_eq!(minify_stylesheet("#aabbcc { color: #aabbcc }"), "#aabbcc{color:#abc}");
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(calculate_compression_ratio(0, 0), 0.0);
        assert_eq!(calculate_compression_ratio(200, 50), 75.0);
    }
}
