//! Encoder configuration.
//!
//! Decoding is configuration-free (the indent unit and delimiters are
//! detected from the document itself); these types only shape the encoder's
//! output.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode_with_options, toon, Delimiter, EncodeOptions};
//!
//! let value = toon!({ "tags": ["a", "b"] });
//!
//! let options = EncodeOptions::new()
//!     .with_delimiter(Delimiter::Pipe)
//!     .with_length_marker('#');
//! let text = encode_with_options(&value, &options).unwrap();
//! assert_eq!(text, "tags[#2|]: a|b");
//! ```

use crate::{Error, Result};

/// Delimiter used between inline array elements, tabular fields, and
/// tabular row cells.
///
/// Tab and pipe are announced by a marker character inside the array
/// header's bracket (`[3\t]`, `[3|]`); comma is the unmarked default.
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The delimiter character itself.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The delimiter as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// The marker written inside array-header brackets; empty for comma.
    #[must_use]
    pub(crate) const fn header_marker(&self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Configuration for [`encode_with_options`](crate::encode_with_options).
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, EncodeOptions};
///
/// let options = EncodeOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Spaces per nesting level. Must be at least 1.
    pub indent: usize,
    /// Delimiter for inline and tabular arrays.
    pub delimiter: Delimiter,
    /// Optional length-marker character; only `'#'` is legal.
    pub length_marker: Option<char>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: None,
        }
    }
}

impl EncodeOptions {
    /// Creates the default options: 2-space indent, comma delimiter, no
    /// length marker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the delimiter for inline and tabular arrays.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Prefixes declared array lengths with `marker` (e.g. `[#3]`).
    #[must_use]
    pub fn with_length_marker(mut self, marker: char) -> Self {
        self.length_marker = Some(marker);
        self
    }

    /// Checks the options before any encoding work begins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] if `indent` is zero or
    /// `length_marker` is any character other than `'#'`.
    pub fn validate(&self) -> Result<()> {
        if self.indent == 0 {
            return Err(Error::InvalidOption(
                "indent must be a positive number of spaces".to_string(),
            ));
        }
        if let Some(marker) = self.length_marker {
            if marker != '#' {
                return Err(Error::InvalidOption(format!(
                    "length marker must be '#', got {:?}",
                    marker
                )));
            }
        }
        Ok(())
    }
}
