use bridgelog_core::offset_sync::{decode_record, encode_key, encode_value, OffsetSync};
use bridgelog_core::topic_partition::TopicPartition;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_encode(c: &mut Criterion) {
    let sync = OffsetSync::new(TopicPartition::new("orders", 3), 100_000, 5_000_000);

    c.bench_function("encode_key", |b| {
        b.iter(|| black_box(encode_key(&sync.partition)));
    });

    c.bench_function("encode_value", |b| {
        b.iter(|| black_box(encode_value(&sync)));
    });
}

fn benchmark_decode(c: &mut Criterion) {
    let sync = OffsetSync::new(TopicPartition::new("orders", 3), 100_000, 5_000_000);
    let key = encode_key(&sync.partition);
    let value = encode_value(&sync);

    c.bench_function("decode_record", |b| {
        b.iter(|| black_box(decode_record(&key, &value).unwrap()));
    });
}

criterion_group!(benches, benchmark_encode, benchmark_decode);
criterion_main!(benches);
