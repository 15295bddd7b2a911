//! Regression coverage for error kinds, messages, and positions. These are
//! the diagnostics callers match on, so the exact wording is pinned here.

use jsontree::{parse, ErrorKind};

#[test]
fn unexpected_character_position() {
    let err = parse("{\"a\": ?}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.message(), "Unexpected character '?'");
    assert_eq!((err.line(), err.column()), (1, 7));
}

#[test]
fn missing_colon_position() {
    let err = parse("{\"key\" 1}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.message(), "Expected ':' after object key");
    assert_eq!((err.line(), err.column()), (1, 8));
}

#[test]
fn non_string_key() {
    let err = parse("{ : 1 }").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.message(), "Expected a string key, found ':'");
    assert_eq!((err.line(), err.column()), (1, 3));
}

#[test]
fn unterminated_string() {
    let err = parse("{\"a\": \"oops}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.message(), "Unterminated string");
}

#[test]
fn leading_zero_number() {
    let err = parse("{\"a\": 0123}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.message(), "Invalid number: leading zeros are not allowed");
}

#[test]
fn dangling_decimal_point() {
    let err = parse("{\"a\": 1.}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(
        err.message(),
        "Invalid number: expected a digit after the decimal point"
    );
}

#[test]
fn control_character_in_string_reports_its_line() {
    let err = parse("{\"a\": \"x\ny\"}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.message(), "Unescaped control character in string");
    assert_eq!(err.line(), 1);
}

#[test]
fn errors_on_later_lines_carry_the_right_position() {
    let input = "{\n  \"a\": 1,\n  \"b\" 2\n}";
    let err = parse(input).unwrap_err();
    assert_eq!(err.message(), "Expected ':' after object key");
    assert_eq!((err.line(), err.column()), (3, 7));
}

#[test]
fn error_display_is_one_line_with_position() {
    let err = parse("{\"a\": tru}").unwrap_err();
    assert_eq!(err.to_string(), "Error: Expected 'true' at line 1, column 7.");
}
