//! Error types for rencode encoding, decoding and container lookups.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or querying rencode values.
#[derive(Error, Debug)]
pub enum RencodeError {
    /// A big number's decimal form is longer than the format allows (encoding path).
    #[error("number is longer than {max} characters ({len})")]
    NumberTooLong { len: usize, max: usize },

    /// The input ended in the middle of a value.
    #[error("truncated input at offset {offset}: need {needed} more bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The cursor was already exhausted; no value was started.
    #[error("end of input")]
    EndOfInput,

    /// The leading byte of a value does not belong to any typecode range.
    #[error("unknown typecode {code} at offset {offset}")]
    UnknownTypecode { code: u8, offset: usize },

    /// A terminator byte appeared where a value was expected.
    #[error("unexpected terminator at offset {offset}")]
    UnexpectedTerminator { offset: usize },

    /// A big-number literal contained something other than an optional sign and digits.
    #[error("malformed big number at offset {offset}")]
    MalformedNumber { offset: usize },

    /// A long-string length prefix was not a decimal number followed by `:`.
    #[error("malformed string length at offset {offset}")]
    MalformedLength { offset: usize },

    /// A single-value decode finished before the end of the input.
    #[error("trailing bytes after value at offset {offset}")]
    TrailingBytes { offset: usize },

    /// Containers were nested deeper than the decoder allows.
    #[error("nesting depth exceeds {max}")]
    DepthExceeded { max: usize },

    /// A dictionary already holds an equal key.
    #[error("duplicate dictionary key")]
    DuplicateKey,

    /// A list index past the end.
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A dictionary lookup found no equal key.
    #[error("key not found")]
    KeyNotFound,

    /// Two dictionary keys render to the same JSON object key.
    #[error("dictionary keys collide as JSON key {key:?}")]
    DuplicateJsonKey { key: String },

    /// The JSON bridge could not parse its input.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout rencode-core.
pub type Result<T> = std::result::Result<T, RencodeError>;
