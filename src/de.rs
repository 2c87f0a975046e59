//! TOON decoding.
//!
//! A hand-written recursive-descent parser over the scanned line sequence.
//! There is no token tree in between: each block of lines is classified as
//! an object, a hyphen list, or an array body and turned directly into a
//! [`Value`].
//!
//! Structure is recovered from indentation and punctuation alone, with a
//! fixed precedence for ambiguous line shapes: array header, then
//! `key: value`, then `key:`. Lines matching none of the shapes are
//! skipped, so a partially malformed document still yields the structure
//! that could be recognized; [`decode`] only fails when nesting exceeds
//! the depth cap.
//!
//! ```rust
//! use toon_codec::decode;
//!
//! let doc = decode("name: Ada\nscores[3]: 95,87,92").unwrap();
//! assert_eq!(doc.get("name").and_then(|v| v.as_str()), Some("Ada"));
//! assert_eq!(doc.get("scores").and_then(|v| v.as_array()).map(Vec::len), Some(3));
//! ```

use crate::header::{parse_array_header, ArrayHeader};
use crate::lex::{find_closing_quote, parse_scalar, split_with_quotes, unescape};
use crate::scan::{detect_indent_unit, scan, Line};
use crate::{Error, Map, Result, Value};

/// Nesting levels allowed before decoding aborts instead of risking the
/// call stack.
pub(crate) const MAX_DEPTH: usize = 128;

/// Decodes a TOON document into a [`Value`].
///
/// Empty (or all-whitespace) input decodes to [`Value::Null`]. Malformed
/// lines are skipped rather than reported.
///
/// # Errors
///
/// Returns [`Error::RecursionLimit`] when the document nests more than
/// 128 levels deep.
pub fn decode(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    let lines = scan(text);
    let unit = detect_indent_unit(&lines);
    let mut parser = Parser {
        lines,
        pos: 0,
        unit,
    };
    parser.skip_blank();

    let first = match parser.current() {
        Some(line) => line,
        None => return Ok(Value::Null),
    };

    // A one-line document with no structure markers is a bare scalar; a
    // line that is one whole quoted span counts even when the quoted text
    // contains a colon.
    if parser.non_blank_count() == 1 && scalar_shaped(first.content) {
        return Ok(parse_scalar(first.content));
    }

    // Keyless array header: the root-array form, valid only here.
    if let Some(header) = parse_array_header(first.content) {
        if header.key.is_none() {
            parser.advance();
            return parser.parse_array_body(&header, first.indent + unit, 1);
        }
    }

    parser.parse_block(0, 0)
}

/// Whether a line's de-indented text begins a hyphen list item.
fn is_list_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

/// Whether a single-line document reads as one scalar.
fn scalar_shaped(content: &str) -> bool {
    if let Some(inner) = content.strip_prefix('"') {
        return find_closing_quote(inner, 0) == Some(inner.len().saturating_sub(1));
    }
    !content.contains(':') && !is_list_item(content) && !content.starts_with('[')
}

/// Splits `key: value` at the first colon outside a quoted key. Returns
/// `None` when the text after the colon is empty (a key-only line).
fn split_key_value(content: &str) -> Option<(String, &str)> {
    let (key, rest) = split_key(content)?;
    let value = rest.strip_prefix(':')?.trim();
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Recognizes a `key:` line with nothing after the colon.
fn parse_key_only(content: &str) -> Option<String> {
    let (key, rest) = split_key(content)?;
    (rest.trim() == ":").then_some(key)
}

/// Reads the key portion of a line: a quoted span (unescaped) or the text
/// before the first colon (trimmed, non-empty).
fn split_key(content: &str) -> Option<(String, &str)> {
    if let Some(inner) = content.strip_prefix('"') {
        let close = find_closing_quote(inner, 0)?;
        return Some((unescape(&inner[..close]), &inner[close + 1..]));
    }
    let colon = content.find(':')?;
    let key = content[..colon].trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), &content[colon..]))
}

/// The decode cursor: the annotated lines, an index into them, and the
/// document's detected indent unit. Owned by one `decode` call; recursion
/// threads `&mut self` plus an explicit depth counter.
struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    unit: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_blank(&mut self) {
        while self.current().is_some_and(|l| l.is_blank()) {
            self.advance();
        }
    }

    fn non_blank_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.is_blank()).count()
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > MAX_DEPTH {
            return Err(Error::RecursionLimit { limit: MAX_DEPTH });
        }
        Ok(())
    }

    /// Classifies the block starting at the cursor: a hyphen item before
    /// any colon-bearing line means a list, a colon first means an object,
    /// and an empty block defaults to an object.
    fn parse_block(&mut self, min_indent: usize, depth: usize) -> Result<Value> {
        let mut i = self.pos;
        while let Some(line) = self.lines.get(i) {
            if line.is_blank() || line.indent < min_indent {
                break;
            }
            if is_list_item(line.content) {
                return self.parse_list_block(min_indent, depth);
            }
            if line.content.contains(':') {
                break;
            }
            i += 1;
        }
        self.parse_object_block(min_indent, depth)
    }

    /// Consumes key-bearing lines at or above `min_indent` into an object.
    fn parse_object_block(&mut self, min_indent: usize, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        let mut map = Map::new();

        while let Some(line) = self.current() {
            if line.is_blank() || line.indent < min_indent {
                break;
            }
            self.parse_field_into(&mut map, line, depth)?;
        }

        Ok(Value::Object(map))
    }

    /// Parses one field line (array header, key-value, or key-only) into
    /// `map`, advancing past the line and any block it owns. Lines that
    /// match no shape are skipped without failing the decode.
    fn parse_field_into(&mut self, map: &mut Map, line: Line<'a>, depth: usize) -> Result<()> {
        if let Some(header) = parse_array_header(line.content) {
            self.advance();
            if let Some(key) = header.key.clone() {
                let value = self.parse_array_body(&header, line.indent + self.unit, depth + 1)?;
                map.insert(key, value);
            }
            // A keyless header has nothing to attach to; its line is
            // dropped and the body lines fall through the lenient skip.
            return Ok(());
        }
        if let Some((key, value_text)) = split_key_value(line.content) {
            self.advance();
            map.insert(key, parse_scalar(value_text));
            return Ok(());
        }
        if let Some(key) = parse_key_only(line.content) {
            self.advance();
            let value = self.parse_block(line.indent + self.unit, depth + 1)?;
            map.insert(key, value);
            return Ok(());
        }
        self.advance();
        Ok(())
    }

    /// Consumes consecutive hyphen items at or above `min_indent` into an
    /// array.
    fn parse_list_block(&mut self, min_indent: usize, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        let mut items = Vec::new();

        while let Some(line) = self.current() {
            if line.is_blank() || line.indent < min_indent || !is_list_item(line.content) {
                break;
            }
            let after = line.content.strip_prefix("- ").unwrap_or("").trim();
            // The column where text after "- " begins; sibling fields of an
            // object item align here.
            let field_indent = line.indent + 2;

            if after.is_empty() {
                self.advance();
                let deeper = self
                    .current()
                    .is_some_and(|next| !next.is_blank() && next.indent > line.indent);
                items.push(if deeper {
                    self.parse_block(line.indent + self.unit, depth + 1)?
                } else {
                    Value::Object(Map::new())
                });
                continue;
            }

            // An unlabelled header after the hyphen is a nested array
            // element.
            if let Some(header) = parse_array_header(after) {
                if header.key.is_none() {
                    self.advance();
                    items.push(self.parse_array_body(
                        &header,
                        field_indent + self.unit,
                        depth + 1,
                    )?);
                    continue;
                }
            }

            if let Some(value) = self.parse_item_object(after, field_indent, depth)? {
                items.push(value);
            } else {
                // Bare scalar element, not wrapped in an object.
                items.push(parse_scalar(after));
                self.advance();
            }
        }

        Ok(Value::Array(items))
    }

    /// Parses a hyphen item whose text is an object's first field, then
    /// accumulates sibling fields from the following lines. Returns `None`
    /// when the text is not a field shape at all.
    fn parse_item_object(
        &mut self,
        after: &'a str,
        field_indent: usize,
        depth: usize,
    ) -> Result<Option<Value>> {
        let mut map = Map::new();

        if let Some(header) = parse_array_header(after) {
            // An array inlined on the hyphen line is the item's first
            // field, never a synthetic "key[n]" string key.
            let key = match header.key.clone() {
                Some(key) => key,
                None => return Ok(None),
            };
            self.advance();
            let value = self.parse_array_body(&header, field_indent + self.unit, depth + 2)?;
            map.insert(key, value);
        } else if let Some((key, value_text)) = split_key_value(after) {
            self.advance();
            map.insert(key, parse_scalar(value_text));
        } else if let Some(key) = parse_key_only(after) {
            self.advance();
            let value = self.parse_block(field_indent + self.unit, depth + 2)?;
            map.insert(key, value);
        } else {
            return Ok(None);
        }

        while let Some(line) = self.current() {
            if line.is_blank() || line.indent < field_indent || is_list_item(line.content) {
                break;
            }
            self.parse_field_into(&mut map, line, depth + 1)?;
        }

        Ok(Some(Value::Object(map)))
    }

    /// Decodes an array body by header shape, in precedence order: inline
    /// values on the header line, tabular rows under a field list, hyphen
    /// list items, or nothing at all. The header's declared length is
    /// advisory and never enforced.
    fn parse_array_body(
        &mut self,
        header: &ArrayHeader<'a>,
        child_indent: usize,
        depth: usize,
    ) -> Result<Value> {
        self.check_depth(depth)?;

        if let Some(inline) = header.inline {
            let values = split_with_quotes(inline, header.delimiter.as_char())
                .into_iter()
                .map(parse_scalar)
                .collect();
            return Ok(Value::Array(values));
        }

        if let Some(fields) = &header.fields {
            let mut rows = Vec::new();
            while let Some(line) = self.current() {
                if line.is_blank() || line.indent < child_indent {
                    break;
                }
                let cells = split_with_quotes(line.content, header.delimiter.as_char());
                let mut row = Map::with_capacity(fields.len());
                for (i, field) in fields.iter().enumerate() {
                    // Short rows backfill null; extra cells are dropped.
                    let value = cells.get(i).map_or(Value::Null, |cell| parse_scalar(cell));
                    row.insert(field.clone(), value);
                }
                rows.push(Value::Object(row));
                self.advance();
            }
            return Ok(Value::Array(rows));
        }

        if let Some(line) = self.current() {
            if !line.is_blank() && line.indent >= child_indent && is_list_item(line.content) {
                return self.parse_list_block(child_indent, depth);
            }
        }

        Ok(Value::Array(Vec::new()))
    }
}

// ---------------------------------------------------------------------------
// Deserializing Rust types out of a decoded Value.

use serde::de::{
    self, DeserializeOwned, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor,
};
use serde::forward_to_deserialize_any;

/// Converts a decoded [`Value`] into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::{decode, from_value};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Point { x: i64, y: i64 }
///
/// let value = decode("x: 1\ny: 2").unwrap();
/// let point: Point = from_value(value).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error when the value's shape does not match `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(value)
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        use crate::value::Number;
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Big(b)) => {
                if let Ok(i) = i64::try_from(&b) {
                    visitor.visit_i64(i)
                } else if let Ok(u) = u64::try_from(&b) {
                    visitor.visit_u64(u)
                } else {
                    visitor.visit_string(b.to_string())
                }
            }
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            // Unit variants decode from their bare name.
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            other => Err(Error::message(format!(
                "expected enum variant name, found {:?}",
                other
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(value).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: <Map as IntoIterator>::IntoIter,
    pending: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            pending: None,
        }
    }
}

impl<'de> MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.pending = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let value = self
            .pending
            .take()
            .ok_or_else(|| Error::message("value requested before key"))?;
        seed.deserialize(value)
    }
}
