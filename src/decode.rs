// src/decode.rs
//
// Pure conversions from raw token slices to values. The tokenizer has
// already validated the syntax, but both decoders re-check the parts of the
// contract they depend on rather than trusting that blindly.

use crate::error::{ErrorKind, ParseError};

/// Decode a string token slice (still carrying its surrounding quotes) into
/// an owned UTF-8 string.
///
/// Escapes expand to their literal characters; `\uXXXX` parses a UTF-16
/// code unit, and a high surrogate must be immediately followed by a
/// `\uXXXX` low surrogate so the pair combines into one supplementary-plane
/// character. Unpaired surrogates are errors, never replacement characters.
pub fn decode_string(raw: &str, line: usize, column: usize) -> Result<String, ParseError> {
    let err = |message: &str| ParseError::new(ErrorKind::Decode, message, line, column);

    let bytes = raw.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return Err(err("String slice is missing its surrounding quotes"));
    }
    let inner = &raw[1..raw.len() - 1];

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => return Err(err("Truncated escape sequence")),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let unit = read_hex4(&mut chars)
                    .ok_or_else(|| err("Invalid hex digit in Unicode escape"))?;
                if (0xDC00..=0xDFFF).contains(&unit) {
                    return Err(err("Unpaired surrogate in Unicode escape"));
                }
                if (0xD800..=0xDBFF).contains(&unit) {
                    // High surrogate: the low half must follow immediately.
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(err("Unpaired surrogate in Unicode escape"));
                    }
                    let low = read_hex4(&mut chars)
                        .ok_or_else(|| err("Invalid hex digit in Unicode escape"))?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(err("Unpaired surrogate in Unicode escape"));
                    }
                    let combined =
                        0x10000 + (((unit as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00);
                    match char::from_u32(combined) {
                        Some(ch) => out.push(ch),
                        None => return Err(err("Invalid Unicode code point")),
                    }
                } else {
                    match char::from_u32(unit as u32) {
                        Some(ch) => out.push(ch),
                        None => return Err(err("Invalid Unicode code point")),
                    }
                }
            }
            Some(_) => return Err(err("Invalid escape sequence")),
        }
    }

    Ok(out)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u16> {
    let mut value: u16 = 0;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(16)?;
        value = (value << 4) | digit as u16;
    }
    Some(value)
}

/// Convert a raw number slice to a double.
///
/// `str::parse::<f64>` is strict and locale-independent, but it also
/// accepts spellings like `inf` that are not JSON numbers, so the slice is
/// checked against the numeric alphabet first.
pub fn decode_number(raw: &str, line: usize, column: usize) -> Result<f64, ParseError> {
    let numeric = !raw.is_empty()
        && raw
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E'));
    if !numeric {
        return Err(ParseError::new(
            ErrorKind::Decode,
            format!("Invalid number '{raw}'"),
            line,
            column,
        ));
    }
    raw.parse::<f64>().map_err(|_| {
        ParseError::new(
            ErrorKind::Decode,
            format!("Invalid number '{raw}'"),
            line,
            column,
        )
    })
}
