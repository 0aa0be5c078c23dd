//! Ordered containers: [`List`] and [`Dictionary`].
//!
//! Both keep insertion order, which determines the encoded byte layout. Equality is
//! position-wise: two dictionaries holding the same pairs in a different order are
//! not equal. Sort before comparing if set semantics are needed.

use crate::error::{RencodeError, Result};
use crate::types::Value;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::collections::HashSet;

/// An ordered sequence of values.
#[derive(Debug, Clone, Default)]
pub struct List {
    values: Vec<Value>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    pub fn get(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or(RencodeError::IndexOutOfBounds {
            index,
            len: self.values.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Same length and pairwise [`Value::equals`].
    pub fn equals(&self, other: &List) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.equals(b))
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Key/value pairs in insertion order.
///
/// Any [`Value`] may be a key. Keys are matched with [`Value::equals`], so a `&str`
/// finds a key that was decoded as raw bytes. Lookups scan linearly; dictionaries in
/// this format are small and order matters more than lookup speed.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    pairs: Vec<(Value, Value)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    /// Append a pair. Fails with [`RencodeError::DuplicateKey`] if an equal key exists.
    pub fn add(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(RencodeError::DuplicateKey);
        }
        self.pairs.push((key, value.into()));
        Ok(())
    }

    pub fn get(&self, key: impl Into<Value>) -> Result<&Value> {
        let key = key.into();
        self.pairs
            .iter()
            .find(|(k, _)| k.equals(&key))
            .map(|(_, v)| v)
            .ok_or(RencodeError::KeyNotFound)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.pairs.iter().any(|(k, _)| k.equals(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.pairs.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.pairs.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Same pair count and, at every position, equal keys and equal values.
    pub fn equals(&self, other: &Dictionary) -> bool {
        self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .zip(&other.pairs)
                .all(|((k1, v1), (k2, v2))| k1.equals(k2) && v1.equals(v2))
    }

    /// Append a pair whose key the caller has already checked with a [`KeySet`].
    pub(crate) fn push_checked(&mut self, key: Value, value: Value) {
        self.pairs.push((key, value));
    }
}

/// Hashable form of a key. Two keys have the same form exactly when
/// [`Value::equals`] holds between them.
#[derive(Debug, PartialEq, Eq, Hash)]
enum KeyForm {
    None,
    Bool(bool),
    Int(i64),
    BigInt(BigInt),
    Float32(u32),
    Float64(u64),
    Bytes(Vec<u8>),
    List(Vec<KeyForm>),
    Dict(Vec<(KeyForm, KeyForm)>),
}

impl KeyForm {
    /// `None` when the key holds a NaN and so equals nothing, itself included.
    fn of(value: &Value) -> Option<KeyForm> {
        Some(match value {
            Value::None => KeyForm::None,
            Value::Bool(b) => KeyForm::Bool(*b),
            Value::BigInt(n) => match n.to_i64() {
                Some(small) => KeyForm::Int(small),
                None => KeyForm::BigInt(n.clone()),
            },
            Value::Int8(n) => KeyForm::Int(i64::from(*n)),
            Value::Int16(n) => KeyForm::Int(i64::from(*n)),
            Value::Int32(n) => KeyForm::Int(i64::from(*n)),
            Value::Int64(n) => KeyForm::Int(*n),
            // -0.0 == 0.0, so both share the bits of +0.0.
            Value::Float32(x) if x.is_nan() => return None,
            Value::Float32(x) => KeyForm::Float32(if *x == 0.0 { 0 } else { x.to_bits() }),
            Value::Float64(x) if x.is_nan() => return None,
            Value::Float64(x) => KeyForm::Float64(if *x == 0.0 { 0 } else { x.to_bits() }),
            Value::Bytes(b) => KeyForm::Bytes(b.clone()),
            Value::String(s) => KeyForm::Bytes(s.as_bytes().to_vec()),
            Value::List(list) => {
                KeyForm::List(list.iter().map(KeyForm::of).collect::<Option<_>>()?)
            }
            Value::Dict(dict) => KeyForm::Dict(
                dict.iter()
                    .map(|(k, v)| Some((KeyForm::of(k)?, KeyForm::of(v)?)))
                    .collect::<Option<_>>()?,
            ),
        })
    }
}

/// Tracks the keys of a dictionary under construction so duplicates are found in
/// constant time per key instead of by a scan.
#[derive(Debug, Default)]
pub(crate) struct KeySet {
    seen: HashSet<KeyForm>,
}

impl KeySet {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Record `key`. Fails with [`RencodeError::DuplicateKey`] if an equal key was
    /// recorded before.
    pub(crate) fn insert(&mut self, key: &Value) -> Result<()> {
        let Some(form) = KeyForm::of(key) else {
            return Ok(());
        };
        if self.seen.insert(form) {
            Ok(())
        } else {
            Err(RencodeError::DuplicateKey)
        }
    }
}
