//! # rencode-core
//!
//! Pure-Rust encoder and decoder for **rencode**, a compact binary serialization format
//! in the bencode family.
//!
//! rencode extends bencode's typecodes across the whole byte range: small integers,
//! short strings and short containers fold their value or length into the leading byte,
//! and wider values use an explicit tag with a fixed-width big-endian payload. The byte
//! layout is shared with the other rencode implementations.
//!
//! ## Quick start
//!
//! ```rust
//! use rencode_core::{decode, encode, Dictionary, List, Value};
//!
//! let mut list = List::new();
//! list.append(2i8);
//! list.append("another string");
//! list.append(false);
//!
//! let mut dict = Dictionary::new();
//! dict.add("int", 42i64).unwrap();
//! dict.add("nested", list).unwrap();
//!
//! let bytes = encode(&Value::Dict(dict.clone())).unwrap();
//! let back = decode(&bytes).unwrap();
//! assert!(back.equals(&Value::Dict(dict)));
//! ```
//!
//! ## Modules
//!
//! - [`typecode`]: tag constants and byte range classification
//! - [`types`]: the `Value` tree and its cross-type equality
//! - [`collections`]: `List` and `Dictionary`
//! - [`encoder`]: `Value` → bytes
//! - [`decoder`]: bytes → `Value`, one top-level value per call
//! - [`config`]: decoder limits
//! - [`json`]: conversions to and from `serde_json::Value`
//! - [`error`]: error types for encoding, decoding and lookups

pub mod collections;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod typecode;
pub mod types;

pub use collections::{Dictionary, List};
pub use config::DecoderConfig;
pub use decoder::{decode, decode_all, Decoder};
pub use encoder::{encode, Encoder};
pub use error::{RencodeError, Result};
pub use json::{from_json, parse_json, to_json};
pub use num_bigint::BigInt;
pub use typecode::Typecode;
pub use types::Value;
