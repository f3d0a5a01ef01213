use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tile_splitter_core::prelude::*;

fn bench_plan_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_grid");

    for side in [4i64, 32, 128] {
        group.throughput(Throughput::Elements((side * side) as u64));

        group.bench_with_input(BenchmarkId::new("no_overlap", side), &side, |b, &side| {
            b.iter(|| black_box(plan(8192, 8192, side, side, 0, false)));
        });

        group.bench_with_input(BenchmarkId::new("overlap_8", side), &side, |b, &side| {
            b.iter(|| black_box(plan(8192, 8192, side, side, 8, false)));
        });

        group.bench_with_input(BenchmarkId::new("keep_aspect", side), &side, |b, &side| {
            b.iter(|| black_box(plan(8192, 4096, side, side, 0, true)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan_grid);
criterion_main!(benches);
