use bridgelog_replication::PartitionState;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_steady_replication(c: &mut Criterion) {
    c.bench_function("partition_state_update_steady", |b| {
        b.iter(|| {
            let mut state = PartitionState::new(100);
            for u in 0..1000i64 {
                black_box(state.update(u, 1000 + u));
            }
        });
    });
}

fn benchmark_drifting_replication(c: &mut Criterion) {
    c.bench_function("partition_state_update_drifting", |b| {
        b.iter(|| {
            let mut state = PartitionState::new(100);
            let mut downstream = 1000i64;
            for u in 0..1000i64 {
                downstream += 2;
                black_box(state.update(u, downstream));
            }
        });
    });
}

criterion_group!(benches, benchmark_steady_replication, benchmark_drifting_replication);
criterion_main!(benches);
