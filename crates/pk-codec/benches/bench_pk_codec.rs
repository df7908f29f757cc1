use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pk_codec::{BhsdCodec, Codec, NumericCodec};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::Cursor;

fn generate_band(len: usize, max: i64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen_range(0..=max)).collect()
}

fn bench_encode(c: &mut Criterion) {
    let refs = generate_band(10_000, 70_000);
    let tags = generate_band(10_000, 127);
    c.bench_function("encode_unsigned5_10k", |b| {
        b.iter(|| black_box(BhsdCodec.encode(black_box(&refs), Codec::UNSIGNED5).unwrap()))
    });
    c.bench_function("encode_byte1_10k", |b| {
        b.iter(|| black_box(BhsdCodec.encode(black_box(&tags), Codec::BYTE1).unwrap()))
    });
}

fn bench_decode(c: &mut Criterion) {
    let refs = generate_band(10_000, 70_000);
    let bytes = BhsdCodec.encode(&refs, Codec::UNSIGNED5).unwrap();
    c.bench_function("decode_unsigned5_10k", |b| {
        b.iter(|| {
            let mut input = Cursor::new(black_box(&bytes));
            black_box(BhsdCodec.decode(&mut input, refs.len(), Codec::UNSIGNED5).unwrap())
        })
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
