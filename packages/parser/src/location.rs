use crate::ast::Location;

/// Convert a byte offset to a 1-based line and column
pub fn offset_to_location(source: &str, offset: usize) -> Location {
    let mut line = 1;
    let mut column = 1;
    let mut byte_pos = 0;

    for ch in source.chars() {
        if byte_pos >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
        byte_pos += ch.len_utf8();
    }

    Location::new(line, column)
}

/// Byte offset of the start of a 1-based line, or `source.len()` if out of bounds
pub fn line_start_offset(source: &str, line: u32) -> usize {
    if line <= 1 {
        return 0;
    }

    let mut current = 1;
    for (idx, byte) in source.bytes().enumerate() {
        if byte == b'\n' {
            current += 1;
            if current == line {
                return idx + 1;
            }
        }
    }

    source.len()
}
