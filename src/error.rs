// src/error.rs
use std::error::Error as StdError;
use std::fmt;

/// Which stage of parsing an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Tokenization failure: unexpected character, unterminated string,
    /// bad escape syntax, malformed number literal.
    Lex,
    /// Grammar violation: wrong or missing punctuation, non-string key,
    /// trailing comma, premature end of input.
    Syntax,
    /// A raw slice could not be converted to its value: invalid hex digit,
    /// unpaired surrogate, non-convertible numeric text.
    Decode,
    /// The configured maximum nesting depth was exceeded.
    NestingLimit,
}

/// A parse failure with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    kind: ErrorKind,
    message: String,
    line: usize,
    column: usize,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error: {} at line {}, column {}.",
            self.message, self.line, self.column
        )
    }
}

impl StdError for ParseError {}

/// Stable exit-code mapping for the CLI. I/O failures exit with 1 before a
/// `ParseError` ever exists.
pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Lex => 2,
        ErrorKind::Syntax => 3,
        ErrorKind::Decode => 4,
        ErrorKind::NestingLimit => 5,
    }
}
