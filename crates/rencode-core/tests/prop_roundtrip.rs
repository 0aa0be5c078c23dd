/// Property-based tests for rencode.
///
/// Uses `proptest` to generate random value trees and byte strings and checks:
///
/// - `decode(encode(v))` equals `v` under `Value::equals`
/// - integers always take the smallest encoding
/// - every strict prefix of an encoding is reported as truncated
/// - arbitrary bytes never panic the decoder, and a failed decode never moves the cursor
///
/// NaN floats are excluded from the roundtrip strategies because NaN never equals itself.
use proptest::prelude::*;
use rencode_core::{
    decode, decode_all, encode, BigInt, Decoder, Dictionary, Encoder, RencodeError, Value,
};

// ============================================================================
// Strategies
// ============================================================================

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::None),
        any::<bool>().prop_map(Value::Bool),
        any::<i8>().prop_map(Value::Int8),
        any::<i16>().prop_map(Value::Int16),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        any::<u64>().prop_map(Value::from),
        any::<i128>().prop_map(|n| Value::BigInt(BigInt::from(n))),
        any::<f32>()
            .prop_filter("NaN never equals itself", |x| !x.is_nan())
            .prop_map(Value::Float32),
        any::<f64>()
            .prop_filter("NaN never equals itself", |x| !x.is_nan())
            .prop_map(Value::Float64),
        prop::collection::vec(any::<u8>(), 0..200).prop_map(Value::Bytes),
        ".{0,80}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 256, 80, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..80)
                .prop_map(|items| Value::List(items.into_iter().collect())),
            prop::collection::vec((inner.clone(), inner), 0..30).prop_map(|pairs| {
                let mut dict = Dictionary::new();
                for (key, value) in pairs {
                    // Generated keys may collide; keep the first.
                    let _ = dict.add(key, value);
                }
                Value::Dict(dict)
            }),
        ]
    })
}

/// Expected encoded size of an integer.
fn expected_int_len(n: i64) -> usize {
    if (-32..44).contains(&n) {
        1
    } else if i8::try_from(n).is_ok() {
        2
    } else if i16::try_from(n).is_ok() {
        3
    } else if i32::try_from(n).is_ok() {
        5
    } else {
        9
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn roundtrip_preserves_value(value in arb_value()) {
        let bytes = encode(&value).expect("encode failed");
        let back = decode(&bytes).expect("decode failed");
        prop_assert!(back.equals(&value), "input: {}\noutput: {}", value, back);
    }

    #[test]
    fn integers_use_minimal_width(n in any::<i64>()) {
        let bytes = encode(&Value::Int64(n)).unwrap();
        prop_assert_eq!(bytes.len(), expected_int_len(n));
        prop_assert_eq!(decode(&bytes).unwrap().as_i64(), Some(n));
    }

    #[test]
    fn strict_prefix_is_truncated(value in arb_value()) {
        let bytes = encode(&value).unwrap();
        let step = (bytes.len() / 64).max(1);
        let cuts = (0..bytes.len()).step_by(step).chain(std::iter::once(bytes.len() - 1));
        for cut in cuts {
            let result = decode(&bytes[..cut]);
            if cut == 0 {
                prop_assert!(matches!(result, Err(RencodeError::EndOfInput)));
            } else {
                prop_assert!(
                    matches!(result, Err(RencodeError::Truncated { .. })),
                    "cut at {} of {}", cut, bytes.len()
                );
            }
        }
    }

    #[test]
    fn stream_decodes_every_value(values in prop::collection::vec(arb_leaf(), 0..20)) {
        let mut encoder = Encoder::new();
        for value in &values {
            encoder.encode(value).unwrap();
        }
        let decoded = decode_all(encoder.bytes()).unwrap();
        prop_assert_eq!(decoded.len(), values.len());
        for (a, b) in decoded.iter().zip(&values) {
            prop_assert!(a.equals(b));
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_all(&bytes);
    }

    #[test]
    fn failed_decode_keeps_cursor(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
        let mut decoder = Decoder::new(&bytes);
        if decoder.decode_next().is_err() {
            prop_assert_eq!(decoder.position(), 0);
        } else {
            prop_assert!(decoder.position() > 0);
        }
    }
}
