//! Errors reported by the text parser.

use alloc::string::String;
use core::fmt;

/// Where and why parsing stopped.
///
/// `line` and `column` are 1-based and point at the first character the
/// parser could not consume; `position` is the same spot as a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.message, self.line, self.column)
    }
}

impl core::error::Error for ParseError {}

/// Build an error for `source`, where `rest` is the unparsed suffix.
pub(crate) fn parse_error(source: &str, rest: &str, message: impl Into<String>) -> ParseError {
    let position = source.len().saturating_sub(rest.len());
    let consumed = &source[..position];
    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(newline) => consumed[newline + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    ParseError {
        message: message.into(),
        position,
        line,
        column,
    }
}
