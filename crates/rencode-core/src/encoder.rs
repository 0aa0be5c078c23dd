//! rencode encoder: converts a [`Value`] tree into bytes.
//!
//! Every value gets the most compact form the format offers:
//!
//! - **Integers**: embedded in the typecode for `-32..44`, otherwise the narrowest of the
//!   1/2/4/8-byte tags that holds the value, otherwise ASCII decimal (tag 61)
//! - **Floats**: the width the value carries (tag 66 or 44); never narrowed
//! - **Byte strings**: length embedded in the typecode below 64 bytes, otherwise
//!   `<decimal length>:<bytes>` with no typecode at all
//! - **Lists / dictionaries**: count embedded in the typecode below 64 elements / 25
//!   pairs, otherwise tag 59 / 60 with a trailing terminator
//!
//! # Example
//! ```
//! use rencode_core::{encode, Value};
//! assert_eq!(encode(&Value::from(10i8)).unwrap(), vec![10]);
//! assert_eq!(encode(&Value::from(-10i8)).unwrap(), vec![79]);
//! ```

use crate::collections::{Dictionary, List};
use crate::error::{RencodeError, Result};
use crate::typecode::*;
use crate::types::Value;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Encode a single value into a fresh buffer.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new();
    encoder.encode(value)?;
    Ok(encoder.into_bytes())
}

/// Appends encoded values to an owned buffer. Several values written in sequence form a
/// stream that [`crate::Decoder`] reads back one at a time.
#[derive(Debug, Default)]
pub struct Encoder {
    buffer: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Append `value`. On error the buffer is left exactly as it was before the call.
    pub fn encode(&mut self, value: &Value) -> Result<()> {
        let mark = self.buffer.len();
        let result = self.encode_value(value);
        if result.is_err() {
            self.buffer.truncate(mark);
        }
        result
    }

    fn encode_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::None => self.encode_none(),
            Value::Bool(b) => self.encode_bool(*b),
            Value::Int8(n) => self.encode_integer(i64::from(*n)),
            Value::Int16(n) => self.encode_integer(i64::from(*n)),
            Value::Int32(n) => self.encode_integer(i64::from(*n)),
            Value::Int64(n) => self.encode_integer(*n),
            Value::BigInt(n) => return self.encode_big_number(n),
            Value::Float32(x) => self.encode_f32(*x),
            Value::Float64(x) => self.encode_f64(*x),
            Value::Bytes(b) => self.encode_bytes(b),
            Value::String(s) => self.encode_bytes(s.as_bytes()),
            Value::List(list) => return self.encode_list(list),
            Value::Dict(dict) => return self.encode_dict(dict),
        }
        Ok(())
    }

    pub fn encode_none(&mut self) {
        self.buffer.push(CHR_NONE);
    }

    pub fn encode_bool(&mut self, b: bool) {
        self.buffer.push(if b { CHR_TRUE } else { CHR_FALSE });
    }

    /// Write `n` in the smallest form that round-trips it.
    pub fn encode_integer(&mut self, n: i64) {
        if (0..i64::from(INT_POS_FIXED_COUNT)).contains(&n) {
            self.buffer.push(INT_POS_FIXED_START + n as u8);
        } else if (-i64::from(INT_NEG_FIXED_COUNT)..0).contains(&n) {
            self.buffer.push(INT_NEG_FIXED_START + (-1 - n) as u8);
        } else if let Ok(n) = i8::try_from(n) {
            self.buffer.push(CHR_INT1);
            self.buffer.extend_from_slice(&n.to_be_bytes());
        } else if let Ok(n) = i16::try_from(n) {
            self.buffer.push(CHR_INT2);
            self.buffer.extend_from_slice(&n.to_be_bytes());
        } else if let Ok(n) = i32::try_from(n) {
            self.buffer.push(CHR_INT4);
            self.buffer.extend_from_slice(&n.to_be_bytes());
        } else {
            self.buffer.push(CHR_INT8);
            self.buffer.extend_from_slice(&n.to_be_bytes());
        }
    }

    /// Write an arbitrary-precision integer. Values that fit in `i64` take the fixed-width
    /// path; larger ones are written as decimal text, at most [`MAX_INT_LENGTH`] characters.
    pub fn encode_big_number(&mut self, n: &BigInt) -> Result<()> {
        if let Some(small) = n.to_i64() {
            self.encode_integer(small);
            return Ok(());
        }
        let digits = n.to_string();
        if digits.len() > MAX_INT_LENGTH {
            return Err(RencodeError::NumberTooLong {
                len: digits.len(),
                max: MAX_INT_LENGTH,
            });
        }
        self.buffer.push(CHR_INT);
        self.buffer.extend_from_slice(digits.as_bytes());
        self.buffer.push(CHR_TERM);
        Ok(())
    }

    pub fn encode_bytes(&mut self, b: &[u8]) {
        if b.len() < STR_FIXED_COUNT as usize {
            self.buffer.push(STR_FIXED_START + b.len() as u8);
        } else {
            self.buffer.extend_from_slice(b.len().to_string().as_bytes());
            self.buffer.push(LENGTH_DELIMITER);
        }
        self.buffer.extend_from_slice(b);
    }

    pub fn encode_f32(&mut self, x: f32) {
        self.buffer.push(CHR_FLOAT32);
        self.buffer.extend_from_slice(&x.to_be_bytes());
    }

    pub fn encode_f64(&mut self, x: f64) {
        self.buffer.push(CHR_FLOAT64);
        self.buffer.extend_from_slice(&x.to_be_bytes());
    }

    fn encode_list(&mut self, list: &List) -> Result<()> {
        let terminated = list.len() >= LIST_FIXED_COUNT as usize;
        if terminated {
            self.buffer.push(CHR_LIST);
        } else {
            self.buffer.push(LIST_FIXED_START + list.len() as u8);
        }
        for item in list {
            self.encode_value(item)?;
        }
        if terminated {
            self.buffer.push(CHR_TERM);
        }
        Ok(())
    }

    fn encode_dict(&mut self, dict: &Dictionary) -> Result<()> {
        let terminated = dict.len() >= DICT_FIXED_COUNT as usize;
        if terminated {
            self.buffer.push(CHR_DICT);
        } else {
            self.buffer.push(DICT_FIXED_START + dict.len() as u8);
        }
        for (key, value) in dict.iter() {
            self.encode_value(key)?;
            self.encode_value(value)?;
        }
        if terminated {
            self.buffer.push(CHR_TERM);
        }
        Ok(())
    }
}
