//! Delimiter and token utilities shared by the decoder.
//!
//! Quote-aware field splitting, string escape handling, and the scalar
//! classification applied to every raw token the block decoder encounters:
//! key-value line values, inline array elements, tabular cells, and bare
//! list-item values.

use crate::value::Number;
use crate::{Delimiter, Value};
use num_bigint::BigInt;

/// Finds the index of the closing `"` starting the search at `start`.
/// A backslash always escapes the following character.
pub(crate) fn find_closing_quote(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Splits `text` on `delimiter`, never inside a double-quoted span.
///
/// A backslash escapes the next character (copied verbatim, not
/// interpreted), so an escaped quote does not toggle quote state and an
/// escaped delimiter does not split. Each token is trimmed of surrounding
/// whitespace.
pub(crate) fn split_with_quotes(text: &str, delimiter: char) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                tokens.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    tokens.push(text[start..].trim());
    tokens
}

/// Resolves the delimiter for an array body.
///
/// An explicit header marker wins; otherwise the sample text (the header's
/// field list or its inline value text) is probed, so a tabular array is
/// recognized even when the header omits the marker.
pub(crate) fn detect_delimiter(marker: Option<char>, sample: &str) -> Delimiter {
    match marker {
        Some('\t') => Delimiter::Tab,
        Some('|') => Delimiter::Pipe,
        _ => {
            if sample.contains('\t') {
                Delimiter::Tab
            } else if sample.contains('|') {
                Delimiter::Pipe
            } else {
                Delimiter::Comma
            }
        }
    }
}

/// Resolves the escape sequences `\" \\ \n \r \t \b \f \uXXXX` inside a
/// quoted span. Unknown escapes are preserved literally rather than
/// rejected.
pub(crate) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) if hex.len() == 4 => out.push(ch),
                    _ => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Whether `s` matches the decoder's numeric grammar: optional leading
/// `-`, digits, optional `.digits`, optional exponent.
///
/// Deliberately narrower than `f64::from_str`, which also accepts `inf`,
/// `nan`, and a leading `+`; the encoder's quoting rules rely on this
/// exact shape.
pub(crate) fn is_numeric_literal(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let bytes = s.as_bytes();
    let mut i = 0;

    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > start
    };

    if !digits(&mut i) {
        return false;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        if !digits(&mut i) {
            return false;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        if !digits(&mut i) {
            return false;
        }
    }
    i == bytes.len()
}

/// Classifies a raw token into a [`Value`].
///
/// `null`/`true`/`false` match case-insensitively; numeric literals become
/// integers (arbitrary-size past i64) or floats; a double-quoted span is
/// unescaped; anything else is a bare string.
pub(crate) fn parse_scalar(token: &str) -> Value {
    let token = token.trim();

    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        return Value::String(unescape(&token[1..token.len() - 1]));
    }
    if token.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if token.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if is_numeric_literal(token) {
        if token.contains(&['.', 'e', 'E'][..]) {
            if let Ok(f) = token.parse::<f64>() {
                return Value::Number(Number::Float(f));
            }
        } else if let Ok(i) = token.parse::<i64>() {
            return Value::Number(Number::Integer(i));
        } else if let Ok(b) = token.parse::<BigInt>() {
            return Value::Number(Number::Big(b));
        }
    }
    Value::String(token.to_string())
}
