use criterion::{black_box, criterion_group, criterion_main, Criterion};
use datum_core::{deserialize, serialize, Data, DataCodec, DatumHash};
use datum_testkit::fixtures::sample_escrow;

fn wide_value() -> Data {
    let entries = (0..256)
        .map(|i| (Data::integer(i), Data::bytes(vec![i as u8; 32])))
        .collect();
    Data::constructor(3u64, vec![Data::map(entries), sample_escrow().to_data()])
}

fn bench_canonical(c: &mut Criterion) {
    let value = wide_value();
    let bytes = serialize(&value);

    c.bench_function("serialize", |b| b.iter(|| serialize(black_box(&value))));
    c.bench_function("deserialize", |b| {
        b.iter(|| deserialize(black_box(&bytes)))
    });
    c.bench_function("hash", |b| b.iter(|| DatumHash::of(black_box(&value))));
    c.bench_function("typed_decode", |b| {
        let escrow = sample_escrow().to_data();
        b.iter(|| datum_testkit::EscrowState::from_data(black_box(&escrow)))
    });
}

criterion_group!(benches, bench_canonical);
criterion_main!(benches);
