//! The rencode value model.
//!
//! [`Value`] is a closed set of variants. The encoder picks a wire form by matching
//! on it, and the decoder builds one per leading typecode.

use crate::collections::{Dictionary, List};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::fmt;

/// A single rencode value. Containers own their children; the tree has no cycles.
///
/// Textual data may be supplied as [`Value::String`], but the wire format has no text
/// type: decoding always yields [`Value::Bytes`]. Use [`Value::equals`] to compare
/// values across that boundary.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    /// Arbitrary-precision integer, written as ASCII decimal when it does not fit in 64 bits.
    BigInt(BigInt),
    Float32(f32),
    Float64(f64),
    Bytes(Vec<u8>),
    String(String),
    List(List),
    Dict(Dictionary),
}

impl Value {
    /// The narrowest fixed-width integer variant that holds `n`.
    pub fn integer(n: i64) -> Value {
        if let Ok(n) = i8::try_from(n) {
            Value::Int8(n)
        } else if let Ok(n) = i16::try_from(n) {
            Value::Int16(n)
        } else if let Ok(n) = i32::try_from(n) {
            Value::Int32(n)
        } else {
            Value::Int64(n)
        }
    }

    /// Structural equality with the format's relaxations:
    ///
    /// - `String` and `Bytes` are equal when their bytes are identical.
    /// - Integer variants compare by value regardless of width.
    /// - Lists and dictionaries compare position by position.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.equals(b),
            (Value::Dict(a), Value::Dict(b)) => a.equals(b),
            _ => {
                if let (Some(a), Some(b)) = (self.as_bytes(), other.as_bytes()) {
                    return a == b;
                }
                integer_eq(self, other).unwrap_or(false)
            }
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Int8(_) | Value::Int16(_) | Value::Int32(_) | Value::Int64(_) | Value::BigInt(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value if this is an integer variant that fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(n) => Some(i64::from(*n)),
            Value::Int16(n) => Some(i64::from(*n)),
            Value::Int32(n) => Some(i64::from(*n)),
            Value::Int64(n) => Some(*n),
            Value::BigInt(n) => n.to_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(f) => Some(f64::from(*f)),
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Raw bytes of a `Bytes` or `String` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// UTF-8 view of a `Bytes` or `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::BigInt(_) => "bigint",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }
}

/// `None` when either side is not an integer.
fn integer_eq(a: &Value, b: &Value) -> Option<bool> {
    match (a, b) {
        (Value::BigInt(x), Value::BigInt(y)) => Some(x == y),
        (Value::BigInt(big), other) | (other, Value::BigInt(big)) => {
            if !other.is_integer() {
                return None;
            }
            Some(other.as_i64().map(BigInt::from).as_ref() == Some(big))
        }
        _ => Some(a.as_i64()? == b.as_i64()?),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("none"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int8(n) => write!(f, "{n}"),
            Value::Int16(n) => write!(f, "{n}"),
            Value::Int32(n) => write!(f, "{n}"),
            Value::Int64(n) => write!(f, "{n}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Float32(x) => write!(f, "{x:?}"),
            Value::Float64(x) => write!(f, "{x:?}"),
            Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Dict(dict) => {
                f.write_str("{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Int8(n)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Int16(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::integer(i64::from(n))
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::integer(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::integer(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::integer(n),
            Err(_) => Value::BigInt(BigInt::from(n)),
        }
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(n)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float32(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float64(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dict(d)
    }
}
