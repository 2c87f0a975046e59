//! The TOON wire format as this crate reads and writes it.
//!
//! TOON (Token-Oriented Object Notation) is a compact, indentation-based
//! text format for JSON-equivalent data, built to cut the token count of
//! structured payloads fed to language models while staying readable and
//! losslessly round-trippable.
//!
//! # Objects
//!
//! One `key: value` line per field, in insertion order; nesting is pure
//! indentation:
//!
//! ```text
//! name: Alice
//! address:
//!   city: Lisbon
//!   zip: "1000-001"
//! ```
//!
//! - A key followed by a bare `:` introduces a nested object on the more
//!   deeply indented lines below it, or an empty object if none follow.
//! - Keys are bare when they are unambiguous; otherwise they are double
//!   quoted. A key is quoted when it is empty, all digits, starts with
//!   `-`, or contains whitespace, the active delimiter, or any of
//!   `, : " [ ] { } \`.
//! - The indent unit is whatever the document itself uses: the decoder
//!   takes the first indentation increase as the unit (2 if the document
//!   never indents). The encoder writes the unit from its options
//!   (default 2).
//!
//! # Scalars
//!
//! `null`, `true`, and `false` are keywords (the decoder accepts any
//! letter case). Numbers are decimal with an optional fraction and
//! exponent; integers too large for 64 bits are kept exact. Everything
//! else is a string, written bare unless quoting is needed:
//!
//! ```text
//! plain: hello
//! spaced: "hello world"
//! versionish: "1.0"
//! keyword: "true"
//! ```
//!
//! Quoted strings escape `\" \\ \n \r \t`; the decoder additionally
//! understands `\b \f \uXXXX` and leaves unknown escapes intact.
//!
//! Non-finite floats have no representation and encode as `null`;
//! negative zero encodes as `0`; floats always use fixed notation.
//!
//! # Arrays
//!
//! Every array header declares the element count in brackets. The count
//! is descriptive: the decoder reads the elements that are actually
//! present and never checks the declared number. With the `#` length
//! marker option the count is written as `[#3]`.
//!
//! **Inline**: all elements scalar:
//!
//! ```text
//! tags[3]: admin,ops,dev
//! ```
//!
//! **Tabular**: all elements are objects with the same field set and
//! scalar values; field order comes from the first element:
//!
//! ```text
//! users[2]{id,name}:
//!   1,Alice
//!   2,Bob
//! ```
//!
//! **List**: anything else, one hyphen per element. An object element
//! carries its first field on the hyphen line and the remaining fields
//! aligned beneath it:
//!
//! ```text
//! mixed[3]:
//!   - 42
//!   - name: Ada
//!     role: admin
//!   - [2]: a,b
//! ```
//!
//! # Delimiters
//!
//! Inline values, tabular field lists, and tabular rows may be separated
//! by comma (default), tab, or pipe. Non-comma delimiters are announced
//! by a marker character before the closing bracket:
//!
//! ```text
//! cols[3|]: a|b|c
//! rows[2\t]{x\ty}:   (marker and separators are real tab characters)
//! ```
//!
//! The decoder also infers the delimiter when the marker is missing but
//! the field list itself contains a tab or pipe. Cells containing the
//! active delimiter are quoted, so a tab-delimited row can carry literal
//! commas unquoted.
//!
//! # Documents
//!
//! A document is an object (the common case), a root array (`[N]:` with
//! nothing before the bracket), or a single scalar line. The empty
//! document is `null`; an empty top-level object encodes to the empty
//! string.
//!
//! # Leniency
//!
//! Decoding is best-effort: a line that is neither an array
//! header, a `key: value` line, nor a `key:` line is skipped, and the
//! rest of the document still decodes. The only decode error is the
//! nesting-depth cap.

// Documentation only; no code.
