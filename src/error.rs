//! Error types for TOON encoding and decoding.
//!
//! The decoder is deliberately lenient: lines that match none of the
//! recognized shapes are skipped rather than reported, so malformed
//! structure never produces an error. What remains is a small taxonomy:
//!
//! - [`Error::InvalidOption`]: bad encoder configuration, reported before
//!   any encoding work begins
//! - [`Error::RecursionLimit`]: input nested deeply enough to threaten the
//!   call stack
//! - [`Error::Io`]: reader/writer failures in the `io` entry points
//! - [`Error::Unsupported`] / [`Error::Message`]: serde conversion failures
//!   in [`to_value`](crate::to_value) / [`from_value`](crate::from_value)

use std::fmt;
use thiserror::Error;

/// All failures the codec can report.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Encoder configuration is invalid (non-positive indent, or a length
    /// marker other than `#`).
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Nesting exceeded the fixed depth cap; returned instead of letting
    /// pathological input overflow the call stack.
    #[error("nesting exceeds the maximum depth of {limit} levels")]
    RecursionLimit { limit: usize },

    /// Reading or writing through the io entry points failed.
    #[error("io error: {0}")]
    Io(String),

    /// A Rust value has no TOON representation (e.g. a map with non-string
    /// keys).
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// Generic serde conversion message.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a generic error with a display message.
    pub fn message<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an error for a value with no TOON representation.
    pub fn unsupported<T: fmt::Display>(msg: T) -> Self {
        Error::Unsupported(msg.to_string())
    }

    pub(crate) fn io(err: &std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
