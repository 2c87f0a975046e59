//! TOON encoding.
//!
//! A single-pass walk over a [`Value`] tree. Objects become `key: value`
//! lines in entry order; each array picks one of three layouts:
//!
//! - **tabular** for a non-empty array of same-shaped, all-scalar objects:
//!   `key[N]{f1,f2}:` plus one delimited row per element
//! - **inline** for an array of scalars: `key[N]: v1,v2`
//! - **list** for everything else: one hyphen line per element
//!
//! Strings and keys are left bare whenever the decoder would read them
//! back unchanged, and quoted otherwise. These layout and quoting rules
//! are exactly what the decoder inverts, so `decode(encode(v))`
//! reproduces `v` up to number formatting.

use crate::lex::is_numeric_literal;
use crate::value::Number;
use crate::{EncodeOptions, Error, Map, Result, Value};
use serde::{ser, Serialize};

/// Encodes a value as TOON text with default options.
///
/// An empty object encodes to the empty document.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon};
///
/// let value = toon!({ "id": 1, "name": "Ada" });
/// assert_eq!(encode(&value).unwrap(), "id: 1\nname: Ada");
/// ```
///
/// # Errors
///
/// Never fails with default options; present for parity with
/// [`encode_with_options`].
pub fn encode(value: &Value) -> Result<String> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encodes a value as TOON text.
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] if the options fail validation; the
/// options are checked before any encoding work begins.
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> Result<String> {
    options.validate()?;
    Ok(to_toon_text(value, options))
}

/// The infallible walk behind [`encode_with_options`], also backing
/// `Display` for [`Value`].
pub(crate) fn to_toon_text(value: &Value, options: &EncodeOptions) -> String {
    let mut out = String::with_capacity(256);
    match value {
        Value::Object(map) => {
            for (i, (key, field)) in map.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                write_field(key, field, 0, options, &mut out);
            }
        }
        Value::Array(arr) => write_array(None, arr, 0, options, &mut out),
        scalar => write_scalar(scalar, options, &mut out),
    }
    out
}

fn push_spaces(out: &mut String, count: usize) {
    for _ in 0..count {
        out.push(' ');
    }
}

/// Writes one object field starting at the key (the caller has already
/// written this line's indentation). `col` is the absolute column of the
/// line, used to place any nested block.
fn write_field(key: &str, value: &Value, col: usize, options: &EncodeOptions, out: &mut String) {
    match value {
        Value::Object(obj) => {
            write_key(key, options, out);
            out.push(':');
            for (k, v) in obj.iter() {
                out.push('\n');
                push_spaces(out, col + options.indent);
                write_field(k, v, col + options.indent, options, out);
            }
        }
        Value::Array(arr) => write_array(Some(key), arr, col, options, out),
        scalar => {
            write_key(key, options, out);
            out.push_str(": ");
            write_scalar(scalar, options, out);
        }
    }
}

/// Writes an array header and body. The header lands on the current line;
/// body lines are indented one unit past `col`.
fn write_array(
    key: Option<&str>,
    arr: &[Value],
    col: usize,
    options: &EncodeOptions,
    out: &mut String,
) {
    if let Some(fields) = tabular_fields(arr) {
        // The decoder's field-list scan ends at the first closing brace,
        // so a '}' in a field name would truncate the list even quoted.
        if fields.iter().all(|f| !f.contains('}'))
            && sniff_safe(fields.iter().map(|f| f.as_str()), options)
        {
            write_tabular(key, arr, &fields, col, options, out);
            return;
        }
    } else if arr.iter().all(is_scalar) {
        let cells: Vec<String> = arr
            .iter()
            .map(|element| {
                let mut cell = String::new();
                write_scalar(element, options, &mut cell);
                cell
            })
            .collect();
        if sniff_safe(cells.iter().map(|c| c.as_str()), options) {
            write_inline(key, &cells, options, out);
            return;
        }
    }
    write_list(key, arr, col, options, out);
}

/// Comma-delimited headers carry no delimiter marker, so the decoder
/// sniffs the header text itself: any tab or pipe in it (even inside
/// quotes) would flip the detected delimiter. Arrays whose rendering
/// trips that rule fall back to the list layout.
fn sniff_safe<'a>(mut parts: impl Iterator<Item = &'a str>, options: &EncodeOptions) -> bool {
    options.delimiter != crate::Delimiter::Comma
        || parts.all(|p| !p.contains(&['\t', '|'][..]))
}

/// The bracketed count, with the optional `#` marker and the delimiter
/// marker for non-comma delimiters.
fn write_bracket(len: usize, with_delimiter: bool, options: &EncodeOptions, out: &mut String) {
    out.push('[');
    if let Some(marker) = options.length_marker {
        out.push(marker);
    }
    out.push_str(&len.to_string());
    if with_delimiter {
        out.push_str(options.delimiter.header_marker());
    }
    out.push(']');
}

fn write_inline(key: Option<&str>, cells: &[String], options: &EncodeOptions, out: &mut String) {
    if let Some(key) = key {
        write_key(key, options, out);
    }
    write_bracket(cells.len(), true, options, out);
    out.push(':');
    for (i, cell) in cells.iter().enumerate() {
        out.push_str(if i == 0 { " " } else { options.delimiter.as_str() });
        out.push_str(cell);
    }
}

fn write_tabular(
    key: Option<&str>,
    arr: &[Value],
    fields: &[&String],
    col: usize,
    options: &EncodeOptions,
    out: &mut String,
) {
    if let Some(key) = key {
        write_key(key, options, out);
    }
    write_bracket(arr.len(), true, options, out);
    out.push('{');
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(options.delimiter.as_str());
        }
        write_key(field, options, out);
    }
    out.push_str("}:");

    for element in arr {
        let obj = match element.as_object() {
            Some(obj) => obj,
            None => continue,
        };
        out.push('\n');
        push_spaces(out, col + options.indent);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str(options.delimiter.as_str());
            }
            write_scalar(obj.get(field).unwrap_or(&Value::Null), options, out);
        }
    }
}

fn write_list(
    key: Option<&str>,
    arr: &[Value],
    col: usize,
    options: &EncodeOptions,
    out: &mut String,
) {
    if let Some(key) = key {
        write_key(key, options, out);
    }
    write_bracket(arr.len(), false, options, out);
    out.push(':');

    let item_col = col + options.indent;
    for element in arr {
        out.push('\n');
        push_spaces(out, item_col);
        match element {
            Value::Object(obj) if obj.is_empty() => out.push('-'),
            Value::Object(obj) => {
                out.push_str("- ");
                // First field rides the hyphen line; the rest align under
                // it, two columns past the hyphen.
                let field_col = item_col + 2;
                for (i, (k, v)) in obj.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                        push_spaces(out, field_col);
                    }
                    write_field(k, v, field_col, options, out);
                }
            }
            Value::Array(nested) => {
                out.push_str("- ");
                write_array(None, nested, item_col + 2, options, out);
            }
            scalar => {
                out.push_str("- ");
                write_scalar(scalar, options, out);
            }
        }
    }
}

/// Field set for the tabular layout: every element a non-empty object with
/// the same key set (order-insensitive) and only scalar values. Field
/// order follows the first element.
fn tabular_fields(arr: &[Value]) -> Option<Vec<&String>> {
    let first = match arr.first() {
        Some(Value::Object(obj)) if !obj.is_empty() => obj,
        _ => return None,
    };
    let fields: Vec<&String> = first.keys().collect();

    for element in arr {
        let obj = match element {
            Value::Object(obj) => obj,
            _ => return None,
        };
        if obj.len() != fields.len() || !fields.iter().all(|f| obj.contains_key(f)) {
            return None;
        }
        if !obj.values().all(is_scalar) {
            return None;
        }
    }
    Some(fields)
}

#[inline]
fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn write_scalar(value: &Value, options: &EncodeOptions, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(Number::Integer(i)) => out.push_str(&i.to_string()),
        Value::Number(Number::Big(b)) => out.push_str(&b.to_string()),
        Value::Number(Number::Float(f)) => write_float(*f, out),
        Value::String(s) => write_string(s, options, out),
        // Containers never reach here; the layout dispatch handles them.
        Value::Array(_) | Value::Object(_) => {}
    }
}

/// Floats normalize to fixed notation: non-finite values become `null`,
/// negative zero becomes `0`, and `f64`'s `Display` supplies the shortest
/// exponent-free decimal form.
fn write_float(f: f64, out: &mut String) {
    if !f.is_finite() {
        out.push_str("null");
    } else if f == 0.0 {
        out.push('0');
    } else {
        out.push_str(&f.to_string());
    }
}

fn write_string(s: &str, options: &EncodeOptions, out: &mut String) {
    if needs_quoting(s, options) {
        write_quoted(s, out);
    } else {
        out.push_str(s);
    }
}

fn write_key(key: &str, options: &EncodeOptions, out: &mut String) {
    if key_needs_quoting(key, options) {
        write_quoted(key, out);
    } else {
        out.push_str(key);
    }
}

fn write_quoted(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Whether a bare rendering of `s` would be misread by the decoder: as a
/// structural token, a different scalar kind, or a split at the active
/// delimiter. The literal checks are case-insensitive because the decoder
/// accepts `null`/`true`/`false` in any case.
fn needs_quoting(s: &str, _options: &EncodeOptions) -> bool {
    // All three legal delimiters are quoted regardless of which one is
    // active: the decoder sniffs tab/pipe out of unmarked headers, so a
    // bare occurrence could change how a whole array body is split.
    s.is_empty()
        || s.contains(&[' ', ':', '"', '\\', '\n', '\r', '\t', ',', '|'][..])
        || s.trim() != s
        || s == "-"
        || s.starts_with("- ")
        || s.starts_with('[')
        || s.starts_with('{')
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || is_numeric_literal(s)
}

/// Keys add their own hazards on top of the string rules: a leading
/// hyphen, an all-digit name, or any structural character.
fn key_needs_quoting(key: &str, options: &EncodeOptions) -> bool {
    needs_quoting(key, options)
        || key.starts_with('-')
        || key.chars().all(|c| c.is_ascii_digit())
        || key
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | ':' | '"' | '[' | ']' | '{' | '}' | '\\'))
}

// ---------------------------------------------------------------------------
// Building a Value from any serde-serializable type.

/// Serializer that produces a [`Value`] tree instead of text; the engine
/// behind [`to_value`](crate::to_value).
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeObject {
    map: Map,
    pending_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeObject;
    type SerializeStruct = SerializeObject;
    type SerializeStructVariant = SerializeObject;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(
            v.iter().map(|&b| Value::from(b)).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::with_capacity(1);
        map.insert(variant.to_string(), value.serialize(ValueSerializer)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported("tuple enum variants"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeObject> {
        Ok(SerializeObject {
            map: Map::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeObject> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeObject> {
        Err(Error::unsupported("struct enum variants"))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeObject {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::String(s) => {
                self.pending_key = Some(s);
                Ok(())
            }
            other => Err(Error::unsupported(format!(
                "map key must be a string, found {:?}",
                other
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::message("serialize_value called without serialize_key"))?;
        self.map.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeObject {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeObject {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}
