// src/parser.rs
use crate::decode::{decode_number, decode_string};
use crate::error::{ErrorKind, ParseError};
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;
use crate::value::Value;

/// Containers may nest this deep before parsing aborts.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Recursive-descent parser that drives the tokenizer one token at a time
/// and builds an owned [`Value`] tree bottom-up.
///
/// Depth counts container nesting: the root object sits at depth 1, and
/// every entry into a value, object, or array re-checks the limit so
/// adversarial nesting fails with an error instead of exhausting the native
/// stack. On any failure the partially built subtree is dropped before the
/// error propagates; the caller sees exactly one outcome.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token<'a>,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Prime the parser with the first token of `input`.
    pub fn new(input: &'a str, max_depth: usize) -> Result<Self, ParseError> {
        let mut tokenizer = Tokenizer::new(input);
        let current = tokenizer.next_token()?;
        Ok(Parser {
            tokenizer,
            current,
            max_depth,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.tokenizer.next_token()?;
        Ok(())
    }

    fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(
            ErrorKind::Syntax,
            message,
            self.current.line,
            self.current.column,
        )
    }

    fn check_depth(&self, depth: usize) -> Result<(), ParseError> {
        if depth > self.max_depth {
            return Err(ParseError::new(
                ErrorKind::NestingLimit,
                "Maximum nesting depth exceeded",
                self.current.line,
                self.current.column,
            ));
        }
        Ok(())
    }

    /// Parse a complete document: a single object followed by end of input.
    pub fn parse_document(&mut self) -> Result<Value, ParseError> {
        if self.current.kind != TokenKind::LeftBrace {
            return Err(self.syntax_error(format!(
                "Expected '{{' at document root, found {}",
                self.current.kind.describe()
            )));
        }
        let root = self.parse_object(1)?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.syntax_error("Unexpected trailing content after document root"));
        }
        Ok(root)
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.check_depth(depth)?;
        match self.current.kind {
            TokenKind::LeftBrace => self.parse_object(depth + 1),
            TokenKind::LeftBracket => self.parse_array(depth + 1),
            TokenKind::Str => {
                let decoded =
                    decode_string(self.current.text, self.current.line, self.current.column)?;
                self.advance()?;
                Ok(Value::String(decoded))
            }
            TokenKind::Number => {
                let number =
                    decode_number(self.current.text, self.current.line, self.current.column)?;
                self.advance()?;
                Ok(Value::Number(number))
            }
            TokenKind::True => {
                self.advance()?;
                Ok(Value::Boolean(true))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(Value::Boolean(false))
            }
            TokenKind::Null => {
                self.advance()?;
                Ok(Value::Null)
            }
            TokenKind::Eof => Err(self.syntax_error("Unexpected end of input, expected a value")),
            _ => Err(self.syntax_error(format!(
                "Expected a value, found {}",
                self.current.kind.describe()
            ))),
        }
    }

    // Caller has already seen '{' as the current token.
    fn parse_object(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.check_depth(depth)?;
        self.advance()?; // past '{'

        let mut members: Vec<(String, Value)> = Vec::new();

        if self.current.kind == TokenKind::RightBrace {
            self.advance()?;
            return Ok(Value::Object(members));
        }

        loop {
            if self.current.kind != TokenKind::Str {
                return Err(self.syntax_error(format!(
                    "Expected a string key, found {}",
                    self.current.kind.describe()
                )));
            }
            let key = decode_string(self.current.text, self.current.line, self.current.column)?;
            self.advance()?;

            if self.current.kind != TokenKind::Colon {
                return Err(self.syntax_error("Expected ':' after object key"));
            }
            self.advance()?;

            let value = self.parse_value(depth)?;
            members.push((key, value));

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if self.current.kind == TokenKind::RightBrace {
                        return Err(self.syntax_error("Trailing comma before '}'"));
                    }
                }
                TokenKind::RightBrace => {
                    self.advance()?;
                    break;
                }
                _ => {
                    return Err(self.syntax_error(format!(
                        "Expected ',' or '}}' after object member, found {}",
                        self.current.kind.describe()
                    )));
                }
            }
        }

        Ok(Value::Object(members))
    }

    // Caller has already seen '[' as the current token.
    fn parse_array(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.check_depth(depth)?;
        self.advance()?; // past '['

        let mut elements = Vec::new();

        if self.current.kind == TokenKind::RightBracket {
            self.advance()?;
            return Ok(Value::Array(elements));
        }

        loop {
            let value = self.parse_value(depth)?;
            elements.push(value);

            match self.current.kind {
                TokenKind::Comma => {
                    self.advance()?;
                    if self.current.kind == TokenKind::RightBracket {
                        return Err(self.syntax_error("Trailing comma before ']'"));
                    }
                }
                TokenKind::RightBracket => {
                    self.advance()?;
                    break;
                }
                _ => {
                    return Err(self.syntax_error(format!(
                        "Expected ',' or ']' after array element, found {}",
                        self.current.kind.describe()
                    )));
                }
            }
        }

        Ok(Value::Array(elements))
    }
}

/// Parse a complete JSON object from `input` with the default depth limit.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    parse_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Parse with a caller-chosen depth limit.
pub fn parse_with_depth(input: &str, max_depth: usize) -> Result<Value, ParseError> {
    Parser::new(input, max_depth)?.parse_document()
}

/// Parse a raw byte buffer, validating UTF-8 first.
pub fn parse_bytes(input: &[u8]) -> Result<Value, ParseError> {
    let text = std::str::from_utf8(input)
        .map_err(|_| ParseError::new(ErrorKind::Lex, "Input is not valid UTF-8", 1, 1))?;
    parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object() {
        let root = parse("{}").unwrap();
        assert_eq!(root, Value::Object(vec![]));
    }

    #[test]
    fn object_with_scalar_and_array_members() {
        let root = parse(r#"{"a":1,"b":[1,2,3]}"#).unwrap();
        let members = root.as_object().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].0, "a");
        assert_eq!(members[0].1, Value::Number(1.0));
        assert_eq!(members[1].0, "b");
        assert_eq!(
            members[1].1,
            Value::Array(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
            ])
        );
    }

    #[test]
    fn nested_containers_and_scalars() {
        let root = parse(
            r#"{"meta": {"count": 1, "tags": ["x", "y"]}, "ok": true, "none": null}"#,
        )
        .unwrap();
        let meta = root.get("meta").unwrap();
        assert!(meta.is_object());
        assert_eq!(meta.get("count").and_then(Value::as_f64), Some(1.0));
        let tags = meta.get("tags").unwrap().as_array().unwrap();
        assert_eq!(tags[1].as_str(), Some("y"));
        assert_eq!(root.get("ok").and_then(Value::as_bool), Some(true));
        assert!(root.get("none").unwrap().is_null());
    }

    #[test]
    fn keys_are_decoded_and_duplicates_preserved() {
        let root = parse("{\"\\u0061\": 1, \"a\": 2}").unwrap();
        let members = root.as_object().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].0, "a");
        assert_eq!(members[1].0, "a");
        assert_eq!(root.get("a").and_then(Value::as_f64), Some(1.0));
    }

    #[test]
    fn root_must_be_an_object() {
        let err = parse("[1, 2]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "Expected '{' at document root, found '['");

        assert!(parse("42").is_err());
        assert!(parse(r#""text""#).is_err());
        assert!(parse("null").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn trailing_content_is_rejected() {
        let err = parse("{} {}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "Unexpected trailing content after document root");
    }

    #[test]
    fn truncated_input_is_a_syntax_error() {
        let err = parse(r#"{"k": "#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "Unexpected end of input, expected a value");

        assert!(parse(r#"{"k": 1"#).is_err());
        assert!(parse(r#"{"k""#).is_err());
        assert!(parse("{").is_err());
    }

    #[test]
    fn trailing_commas_are_rejected() {
        let err = parse(r#"{"a":1,}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "Trailing comma before '}'");

        let err = parse(r#"{"a":[1,2,]}"#).unwrap_err();
        assert_eq!(err.message(), "Trailing comma before ']'");
    }

    #[test]
    fn object_grammar_errors() {
        let err = parse("{1: 2}").unwrap_err();
        assert_eq!(err.message(), "Expected a string key, found a number");

        let err = parse(r#"{"key" 1}"#).unwrap_err();
        assert_eq!(err.message(), "Expected ':' after object key");
        assert_eq!((err.line(), err.column()), (1, 8));

        let err = parse(r#"{"a":1 "b":2}"#).unwrap_err();
        assert_eq!(
            err.message(),
            "Expected ',' or '}' after object member, found a string"
        );
    }

    #[test]
    fn array_grammar_errors() {
        let err = parse(r#"{"a":[1 2]}"#).unwrap_err();
        assert_eq!(
            err.message(),
            "Expected ',' or ']' after array element, found a number"
        );
    }

    #[test]
    fn decode_failures_surface_with_positions() {
        let err = parse("{\"bad\": \"\\ud800\"}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.message(), "Unpaired surrogate in Unicode escape");
        assert_eq!((err.line(), err.column()), (1, 9));
    }

    #[test]
    fn depth_limit_counts_containers() {
        // Three containers: object, array, object.
        let input = r#"{"a": [{"b": 1}]}"#;
        assert!(parse_with_depth(input, 3).is_ok());

        let err = parse_with_depth(input, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingLimit);
        assert_eq!(err.message(), "Maximum nesting depth exceeded");
    }

    #[test]
    fn deep_nesting_fails_with_the_limit_error() {
        // 80 nested objects, past the default limit of 64.
        let mut input = String::new();
        for _ in 0..80 {
            input.push_str("{\"a\":");
        }
        input.push('1');
        for _ in 0..80 {
            input.push('}');
        }
        let err = parse(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingLimit);
    }

    #[test]
    fn nesting_at_the_limit_succeeds() {
        let mut input = String::new();
        for _ in 0..DEFAULT_MAX_DEPTH {
            input.push_str("{\"a\":");
        }
        input.push('1');
        for _ in 0..DEFAULT_MAX_DEPTH {
            input.push('}');
        }
        assert!(parse(&input).is_ok());
    }

    #[test]
    fn lex_errors_abort_the_parse() {
        let err = parse(r#"{"a": 01}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lex);

        let err = parse(r#"{"a": tru}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lex);
        assert_eq!(err.message(), "Expected 'true'");
    }

    #[test]
    fn parse_bytes_validates_utf8() {
        assert!(parse_bytes(br#"{"a": 1}"#).is_ok());

        let err = parse_bytes(&[0xff, 0xfe, b'{', b'}']).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lex);
        assert_eq!(err.message(), "Input is not valid UTF-8");
    }
}
