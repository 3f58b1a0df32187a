use thiserror::Error;

/// Failure raised by a sub-compiler, injector or post-processing plugin.
///
/// `line` and `column` are 1-based and refer to the text the capability was
/// given. The pipeline pads section text so that they match the document.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}{}", location_suffix(.line, .column))]
pub struct CapabilityError {
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl CapabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl From<String> for CapabilityError {
    fn from(s: String) -> Self {
        CapabilityError::new(s)
    }
}

impl From<&str> for CapabilityError {
    fn from(s: &str) -> Self {
        CapabilityError::new(s)
    }
}

fn location_suffix(line: &Option<u32>, column: &Option<u32>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" (line {}, column {})", line, column),
        (Some(line), None) => format!(" (line {})", line),
        _ => String::new(),
    }
}
