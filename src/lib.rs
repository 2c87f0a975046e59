//! # toon-codec
//!
//! A bidirectional codec between JSON-equivalent values and TOON
//! (Token-Oriented Object Notation).
//!
//! ## What is TOON?
//!
//! TOON is a compact, indentation-based text format for the JSON data
//! model, designed to cut the token count of structured payloads sent to
//! Large Language Models while remaining human-readable and losslessly
//! round-trippable.
//!
//! ## Key Features
//!
//! - **Value-centric**: [`decode`] turns TOON text directly into a
//!   [`Value`] tree; [`encode`] walks a tree back to text. No intermediate
//!   representation, no schema.
//! - **Tabular arrays**: uniform object arrays collapse to a header plus
//!   one delimited row per element
//! - **Three delimiters**: comma, tab, or pipe, announced in the array
//!   header and auto-detected on decode
//! - **Lenient decoding**: unrecognized lines are skipped, so partially
//!   malformed input still yields everything that could be recognized
//! - **Serde bridge**: [`to_value`]/[`from_value`] connect any
//!   `Serialize`/`Deserialize` type to the codec
//!
//! ## Quick Start
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let value = toon!({
//!     "users": [
//!         { "id": 1, "name": "Alice" },
//!         { "id": 2, "name": "Bob" }
//!     ]
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "users[2]{id,name}:\n  1,Alice\n  2,Bob");
//!
//! let back = decode(&text).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Working with Rust types
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! let user = User { id: 7, name: "Ada".to_string() };
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 7\nname: Ada");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(back, user);
//! ```
//!
//! ## Format
//!
//! The wire format is documented in the [`format`] module. The original
//! TOON specification lives at <https://github.com/toon-format/toon>.

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

mod header;
mod lex;
mod scan;

pub use de::{decode, from_value};
pub use error::{Error, Result};
pub use map::Map;
pub use options::{Delimiter, EncodeOptions};
pub use ser::{encode, encode_with_options, ValueSerializer};
pub use value::{Number, Value};

use serde::{de::DeserializeOwned, Serialize};
use std::io;

/// Converts any `T: Serialize` into a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use toon_codec::to_value;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error for values with no TOON representation, such as maps
/// with non-string keys.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializes any `T: Serialize` to a TOON string with default options.
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as a [`Value`].
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a TOON string.
///
/// # Errors
///
/// Returns an error if the options are invalid or `value` cannot be
/// represented as a [`Value`].
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    encode_with_options(&to_value(value)?, options)
}

/// Deserializes a `T` from TOON text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use toon_codec::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i64, y: i64 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error when the decoded document does not match the shape of
/// `T`.
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode(text)?)
}

/// Encodes a value as TOON and writes it to `writer`.
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] for bad options and [`Error::Io`] when
/// the writer fails.
pub fn encode_to_writer<W>(mut writer: W, value: &Value, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
{
    let text = encode_with_options(value, options)?;
    writer.write_all(text.as_bytes()).map_err(|e| Error::io(&e))
}

/// Reads TOON text from `reader` and decodes it.
///
/// # Errors
///
/// Returns [`Error::Io`] when reading fails (including invalid UTF-8) and
/// otherwise whatever [`decode`] returns.
pub fn decode_from_reader<R>(mut reader: R) -> Result<Value>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e))?;
    decode(&text)
}
