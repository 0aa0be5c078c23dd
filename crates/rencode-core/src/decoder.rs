//! rencode decoder: reads [`Value`]s back from bytes.
//!
//! A [`Decoder`] is a cursor over a borrowed byte slice. Each call to
//! [`Decoder::decode_next`] consumes exactly one top-level value, so a stream of
//! concatenated values is read by calling it until [`RencodeError::EndOfInput`].
//!
//! # Key design decisions
//!
//! - **Dispatch on [`Typecode`]**: every leading byte is classified once and matched;
//!   ASCII digits are long-string length prefixes, never embedded integers.
//! - **Narrowest output type**: integers decode to the width of the tag that was
//!   written (embedded values are `Int8`). Text always decodes to `Bytes`.
//! - **All or nothing**: on any error the cursor is rewound to where the call began,
//!   and no partial value escapes.
//! - **Bounded recursion**: container nesting is capped by [`DecoderConfig::max_depth`].
//! - **Linear dictionaries**: duplicate keys are caught by hashing each key, so a
//!   dictionary of `n` pairs costs `O(n)` to check rather than `O(n²)`.

use crate::collections::{Dictionary, KeySet, List};
use crate::config::DecoderConfig;
use crate::error::{RencodeError, Result};
use crate::typecode::{Typecode, CHR_TERM, LENGTH_DELIMITER, MAX_INT_LENGTH};
use crate::types::Value;
use num_bigint::BigInt;
use tracing::{debug, trace};

/// Decode exactly one value. Bytes left over after it are an error.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    let mut decoder = Decoder::new(bytes);
    let value = decoder.decode_next()?;
    if !decoder.is_empty() {
        return Err(RencodeError::TrailingBytes {
            offset: decoder.position(),
        });
    }
    Ok(value)
}

/// Decode every value in a concatenated stream.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Value>> {
    Decoder::new(bytes).collect()
}

/// Cursor over an encoded byte stream.
///
/// Also an [`Iterator`] over `Result<Value>`: iteration ends cleanly at the end of the
/// input and stops after the first error.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    config: DecoderConfig,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, DecoderConfig::default())
    }

    pub fn with_config(input: &'a [u8], config: DecoderConfig) -> Self {
        Self {
            input,
            pos: 0,
            config,
            failed: false,
        }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the input.
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Decode the next top-level value and advance past it.
    ///
    /// Returns [`RencodeError::EndOfInput`] when nothing is left. On any other error the
    /// cursor does not move.
    pub fn decode_next(&mut self) -> Result<Value> {
        if self.is_empty() {
            return Err(RencodeError::EndOfInput);
        }
        let start = self.pos;
        self.decode_value(0).inspect_err(|err| {
            debug!(offset = start, error = %err, "decode failed");
            self.pos = start;
        })
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value> {
        let offset = self.pos;
        let code = self.read_byte()?;
        match Typecode::classify(code) {
            Typecode::PosFixed(n) | Typecode::NegFixed(n) => Ok(Value::Int8(n)),
            Typecode::Int8 => Ok(Value::Int8(i8::from_be_bytes(self.take_array()?))),
            Typecode::Int16 => Ok(Value::Int16(i16::from_be_bytes(self.take_array()?))),
            Typecode::Int32 => Ok(Value::Int32(i32::from_be_bytes(self.take_array()?))),
            Typecode::Int64 => Ok(Value::Int64(i64::from_be_bytes(self.take_array()?))),
            Typecode::BigNumber => self.decode_big_number(),
            Typecode::Float32 => Ok(Value::Float32(f32::from_be_bytes(self.take_array()?))),
            Typecode::Float64 => Ok(Value::Float64(f64::from_be_bytes(self.take_array()?))),
            Typecode::True => Ok(Value::Bool(true)),
            Typecode::False => Ok(Value::Bool(false)),
            Typecode::None => Ok(Value::None),
            Typecode::BytesFixed(len) => Ok(Value::Bytes(self.take(len)?.to_vec())),
            Typecode::LongBytes => self.decode_long_bytes(offset),
            Typecode::ListFixed(len) => {
                self.enter(depth)?;
                let mut list = List::with_capacity(len);
                for _ in 0..len {
                    list.append(self.decode_value(depth + 1)?);
                }
                Ok(Value::List(list))
            }
            Typecode::ListTerminated => {
                self.enter(depth)?;
                trace!(offset, "terminated list");
                let mut list = List::new();
                while !self.at_terminator()? {
                    list.append(self.decode_value(depth + 1)?);
                }
                Ok(Value::List(list))
            }
            Typecode::DictFixed(len) => {
                self.enter(depth)?;
                let mut dict = Dictionary::with_capacity(len);
                let mut keys = KeySet::with_capacity(len);
                for _ in 0..len {
                    self.decode_pair(&mut dict, &mut keys, depth)?;
                }
                Ok(Value::Dict(dict))
            }
            Typecode::DictTerminated => {
                self.enter(depth)?;
                trace!(offset, "terminated dict");
                let mut dict = Dictionary::new();
                let mut keys = KeySet::default();
                while !self.at_terminator()? {
                    self.decode_pair(&mut dict, &mut keys, depth)?;
                }
                Ok(Value::Dict(dict))
            }
            Typecode::Terminator => Err(RencodeError::UnexpectedTerminator { offset }),
            Typecode::Unknown => Err(RencodeError::UnknownTypecode { code, offset }),
        }
    }

    /// One key/value pair of a dictionary at `depth`. Equal keys are a
    /// [`RencodeError::DuplicateKey`].
    fn decode_pair(
        &mut self,
        dict: &mut Dictionary,
        keys: &mut KeySet,
        depth: usize,
    ) -> Result<()> {
        let key = self.decode_value(depth + 1)?;
        keys.insert(&key)?;
        let value = self.decode_value(depth + 1)?;
        dict.push_checked(key, value);
        Ok(())
    }

    /// `<digits>:<bytes>`; the first digit has already been consumed.
    fn decode_long_bytes(&mut self, offset: usize) -> Result<Value> {
        let input = self.input;
        let rest = &input[offset..];
        let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        match rest.get(digits) {
            Some(&LENGTH_DELIMITER) => {}
            Some(_) => return Err(RencodeError::MalformedLength { offset }),
            None => return Err(self.truncated_at(self.input.len(), 1)),
        }
        let len = std::str::from_utf8(&rest[..digits])
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or(RencodeError::MalformedLength { offset })?;
        trace!(offset, len, "long string");
        self.pos = offset + digits + 1;
        Ok(Value::Bytes(self.take(len)?.to_vec()))
    }

    /// `[-]<digits>` closed by the terminator; the tag has already been consumed.
    /// Literals longer than [`MAX_INT_LENGTH`] are rejected, as the encoder never
    /// writes them.
    fn decode_big_number(&mut self) -> Result<Value> {
        let start = self.pos;
        let rest = self.remaining();
        let mut end = None;
        for (i, &b) in rest.iter().enumerate() {
            if b == CHR_TERM {
                end = Some(i);
                break;
            }
            if i >= MAX_INT_LENGTH || !(b.is_ascii_digit() || (i == 0 && b == b'-')) {
                return Err(RencodeError::MalformedNumber { offset: start + i });
            }
        }
        let end = end.ok_or_else(|| self.truncated_at(self.input.len(), 1))?;
        let literal = &rest[..end];
        let n = BigInt::parse_bytes(literal, 10)
            .ok_or(RencodeError::MalformedNumber { offset: start })?;
        self.pos = start + end + 1;
        Ok(Value::BigInt(n))
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.config.max_depth {
            return Err(RencodeError::DepthExceeded {
                max: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Consume the terminator if it is next. Running out of input here means the
    /// container was never closed.
    fn at_terminator(&mut self) -> Result<bool> {
        match self.input.get(self.pos).copied() {
            Some(CHR_TERM) => {
                self.pos += 1;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(self.truncated_at(self.pos, 1)),
        }
    }

    fn read_byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.input.len() - self.pos;
        if available < n {
            return Err(self.truncated_at(self.pos, n));
        }
        let input = self.input;
        let bytes = &input[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn truncated_at(&self, offset: usize, needed: usize) -> RencodeError {
        RencodeError::Truncated {
            offset,
            needed,
            available: self.input.len().saturating_sub(offset),
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_empty() {
            return None;
        }
        let item = self.decode_next();
        self.failed = item.is_err();
        Some(item)
    }
}
