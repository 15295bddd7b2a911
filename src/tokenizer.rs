// src/tokenizer.rs
use crate::error::{ErrorKind, ParseError};
use crate::token::{Token, TokenKind};
use memchr::memchr2;

// Byte-property lookup table: one classification per input byte.
const W: u8 = 1; // Whitespace
const S: u8 = 2; // Structural punctuation
const L: u8 = 3; // Keyword literal start
const D: u8 = 4; // Number start
const Q: u8 = 5; // Quote

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0u8; 256];
    table[b' ' as usize] = W;
    table[b'\t' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    table[b'"' as usize] = Q;

    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    table
};

/// Scans the input one token at a time.
///
/// The tokenizer classifies and positions slices of the buffer but never
/// allocates: string and number tokens carry the raw matched text, and the
/// decoders in [`crate::decode`] turn those slices into values.
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            cursor: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.cursor).copied()
    }

    #[inline]
    fn advance_byte(&mut self) -> u8 {
        let byte = self.bytes()[self.cursor];
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.cursor += 1;
        byte
    }

    // Bulk advance over a run known to contain no newlines.
    #[inline]
    fn advance_run(&mut self, n: usize) {
        self.cursor += n;
        self.column += n;
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(kind, message, self.line, self.column)
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes().get(self.cursor) {
            if BYTE_PROPERTIES[byte as usize] != W {
                break;
            }
            self.advance_byte();
        }
    }

    /// Read the next token. After the input is exhausted this keeps
    /// returning an end-of-input token; after an error the stream is dead.
    pub fn next_token(&mut self) -> Result<Token<'a>, ParseError> {
        self.skip_whitespace();

        let (start_line, start_column) = (self.line, self.column);
        let start = self.cursor;

        let byte = match self.peek() {
            Some(b) => b,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: "",
                    line: start_line,
                    column: start_column,
                });
            }
        };

        let kind = match BYTE_PROPERTIES[byte as usize] {
            S => {
                self.advance_byte();
                match byte {
                    b'{' => TokenKind::LeftBrace,
                    b'}' => TokenKind::RightBrace,
                    b'[' => TokenKind::LeftBracket,
                    b']' => TokenKind::RightBracket,
                    b':' => TokenKind::Colon,
                    b',' => TokenKind::Comma,
                    _ => unreachable!(),
                }
            }
            L => match byte {
                b't' => self.scan_keyword("true", TokenKind::True)?,
                b'f' => self.scan_keyword("false", TokenKind::False)?,
                b'n' => self.scan_keyword("null", TokenKind::Null)?,
                _ => unreachable!(),
            },
            D => self.scan_number()?,
            Q => self.scan_string()?,
            _ => {
                let ch = self.input[self.cursor..].chars().next().unwrap_or('\u{FFFD}');
                return Err(self.error(ErrorKind::Lex, format!("Unexpected character '{ch}'")));
            }
        };

        Ok(Token {
            kind,
            text: &self.input[start..self.cursor],
            line: start_line,
            column: start_column,
        })
    }

    fn scan_keyword(
        &mut self,
        literal: &'static str,
        kind: TokenKind,
    ) -> Result<TokenKind, ParseError> {
        let end = self.cursor + literal.len();
        if self.bytes().get(self.cursor..end) == Some(literal.as_bytes()) {
            self.advance_run(literal.len());
            Ok(kind)
        } else {
            Err(self.error(ErrorKind::Lex, format!("Expected '{literal}'")))
        }
    }

    // Scan a string without decoding it. Escape sequences are validated
    // syntactically; expansion happens in the decoder so the token can stay
    // a plain slice. The matched text includes both quotes.
    fn scan_string(&mut self) -> Result<TokenKind, ParseError> {
        self.advance_byte(); // opening quote

        loop {
            let rest = &self.bytes()[self.cursor..];
            // Jump over the plain run up to the next quote or backslash.
            let stop = memchr2(b'"', b'\\', rest).unwrap_or(rest.len());
            if let Some(i) = rest[..stop].iter().position(|&b| b < 0x20) {
                self.advance_run(i);
                return Err(self.error(
                    ErrorKind::Lex,
                    "Unescaped control character in string",
                ));
            }
            self.advance_run(stop);

            match self.peek() {
                None => return Err(self.error(ErrorKind::Lex, "Unterminated string")),
                Some(b'"') => {
                    self.advance_byte();
                    return Ok(TokenKind::Str);
                }
                Some(_) => {
                    self.advance_byte(); // backslash
                    self.scan_escape()?;
                }
            }
        }
    }

    // The byte after a backslash, plus 4 hex digits for \u.
    fn scan_escape(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            None => Err(self.error(ErrorKind::Lex, "Unterminated string")),
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                self.advance_byte();
                Ok(())
            }
            Some(b'u') => {
                self.advance_byte();
                for _ in 0..4 {
                    match self.peek() {
                        Some(b) if b.is_ascii_hexdigit() => {
                            self.advance_byte();
                        }
                        Some(_) => {
                            return Err(
                                self.error(ErrorKind::Lex, "Non-hex char in Unicode escape")
                            );
                        }
                        None => {
                            return Err(
                                self.error(ErrorKind::Lex, "Incomplete Unicode escape")
                            );
                        }
                    }
                }
                Ok(())
            }
            Some(_) => Err(self.error(ErrorKind::Lex, "Invalid escape sequence")),
        }
    }

    // Strict number grammar: -? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE][+-]?[0-9]+)?
    fn scan_number(&mut self) -> Result<TokenKind, ParseError> {
        if self.peek() == Some(b'-') {
            self.advance_byte();
        }

        match self.peek() {
            Some(b'0') => {
                self.advance_byte();
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(self.error(
                        ErrorKind::Lex,
                        "Invalid number: leading zeros are not allowed",
                    ));
                }
            }
            Some(b'1'..=b'9') => {
                self.advance_byte();
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.advance_byte();
                }
            }
            _ => {
                return Err(self.error(ErrorKind::Lex, "Invalid number: expected a digit"));
            }
        }

        if self.peek() == Some(b'.') {
            self.advance_byte();
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error(
                    ErrorKind::Lex,
                    "Invalid number: expected a digit after the decimal point",
                ));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.advance_byte();
            }
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.advance_byte();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.advance_byte();
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error(
                    ErrorKind::Lex,
                    "Invalid number: expected a digit in the exponent",
                ));
            }
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.advance_byte();
            }
        }

        Ok(TokenKind::Number)
    }
}
