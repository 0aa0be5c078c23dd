use criterion::{criterion_group, criterion_main, Criterion};
use rencode_core::{decode, encode, Dictionary, List, Value};
use std::hint::black_box;

/// A dictionary shaped like a typical RPC payload: short keys, mixed scalars, a nested
/// list, and one long binary blob.
fn sample_payload() -> Value {
    let mut dict = Dictionary::new();
    for i in 0..40 {
        let mut row = List::new();
        row.append(i as i64 * 1_000_003);
        row.append(format!("item {i}"));
        row.append(i % 2 == 0);
        row.append(i as f64 / 3.0);
        dict.add(format!("row {i}"), row).unwrap();
    }
    dict.add("blob", vec![0xabu8; 4096]).unwrap();
    Value::Dict(dict)
}

fn bench_codec(c: &mut Criterion) {
    let payload = sample_payload();
    let bytes = encode(&payload).unwrap();

    c.bench_function("encode_payload", |b| {
        b.iter(|| encode(black_box(&payload)).unwrap())
    });
    c.bench_function("decode_payload", |b| {
        b.iter(|| decode(black_box(&bytes)).unwrap())
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
