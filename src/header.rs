//! Array-header recognition.
//!
//! An array header is the one-line shape
//! `key[#N<marker>]{fields}: inline` where everything except the bracketed
//! count and the colon is optional. [`parse_array_header`] decomposes a
//! line's de-indented text into an [`ArrayHeader`], or returns `None` so
//! the caller can try the line as a key-value or key-only line instead.

use crate::lex::{detect_delimiter, find_closing_quote, split_with_quotes, unescape};
use crate::Delimiter;

/// Decomposed array header. Derived on demand from a single line and not
/// retained past the body parse.
#[derive(Debug, PartialEq)]
pub(crate) struct ArrayHeader<'a> {
    /// Key before the bracket; `None` for the root-array form `[N]:`.
    pub key: Option<String>,
    /// Declared element count. Advisory only; the decoder never checks it
    /// against the actual number of elements.
    #[allow(dead_code)]
    pub len: usize,
    /// Delimiter for the field list, inline values, and rows. Resolved
    /// from the explicit marker or, failing that, from the header's own
    /// text.
    pub delimiter: Delimiter,
    /// Field names for a tabular body, already split and unquoted.
    pub fields: Option<Vec<String>>,
    /// Trailing same-line value text for an inline body.
    pub inline: Option<&'a str>,
}

/// Tries to read `content` as an array header.
///
/// The key prefix is non-greedy: successive `[` positions are tried left
/// to right until the remainder parses. A quoted key is unescaped and must
/// be immediately followed by its bracket.
pub(crate) fn parse_array_header(content: &str) -> Option<ArrayHeader<'_>> {
    if let Some(rest) = content.strip_prefix('"') {
        let close = 1 + find_closing_quote(rest, 0)?;
        let key = unescape(&content[1..close]);
        let after = &content[close + 1..];
        if !after.starts_with('[') {
            return None;
        }
        return parse_bracket(after, Some(key));
    }

    for (pos, ch) in content.char_indices() {
        match ch {
            // A colon or quote before the bracket means this is really a
            // key-value line; an unquoted header key never contains them.
            ':' | '"' => return None,
            '[' => {
                let key = content[..pos].trim();
                let key = (!key.is_empty()).then(|| key.to_string());
                if let Some(header) = parse_bracket(&content[pos..], key) {
                    return Some(header);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parses `[#N<marker>]{fields}: inline` starting at the opening bracket.
fn parse_bracket<'a>(text: &'a str, key: Option<String>) -> Option<ArrayHeader<'a>> {
    let mut rest = text.strip_prefix('[')?;
    rest = rest.strip_prefix('#').unwrap_or(rest);

    let digits_end = rest.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let len: usize = rest[..digits_end].parse().ok()?;
    rest = &rest[digits_end..];

    let marker = match rest.chars().next()? {
        c @ ('\t' | '|') => {
            rest = &rest[1..];
            Some(c)
        }
        _ => None,
    };
    rest = rest.strip_prefix(']')?;

    let fields_text = if rest.starts_with('{') {
        let close = rest.find('}')?;
        let inner = &rest[1..close];
        rest = &rest[close + 1..];
        Some(inner)
    } else {
        None
    };

    rest = rest.strip_prefix(':')?;
    let inline = rest.trim();
    let inline = (!inline.is_empty()).then_some(inline);

    let delimiter = detect_delimiter(marker, fields_text.or(inline).unwrap_or(""));
    let fields = fields_text.map(|text| {
        split_with_quotes(text, delimiter.as_char())
            .into_iter()
            .map(unquote)
            .collect()
    });

    Some(ArrayHeader {
        key,
        len,
        delimiter,
        fields,
        inline,
    })
}

fn unquote(token: &str) -> String {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        unescape(&token[1..token.len() - 1])
    } else {
        token.to_string()
    }
}
