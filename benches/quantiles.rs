use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hdrhist::Histogram;

fn loaded() -> Histogram<u32> {
    let mut h = Histogram::<u32>::new_with_bounds(1, 100_000, 3).unwrap();
    for i in 0..100_000 {
        h.record(i).unwrap();
    }
    h
}

fn bench_quantiles(c: &mut Criterion) {
    let h = loaded();

    let mut group = c.benchmark_group("Histogram/statistics");
    group.bench_function("value_at_percentile", |b| {
        b.iter(|| {
            black_box(h.value_at_percentile(black_box(1.0)));
            black_box(h.value_at_percentile(black_box(99.999)));
        })
    });
    group.bench_function("mean", |b| b.iter(|| black_box(h.mean())));
    group.bench_function("stdev", |b| b.iter(|| black_box(h.stdev())));
    group.bench_function("cumulative_distribution", |b| {
        b.iter(|| black_box(h.cumulative_distribution()))
    });
    group.finish();

    let mut group = c.benchmark_group("Histogram/iter");
    group.bench_function("recorded", |b| {
        b.iter(|| black_box(h.iter_recorded().count()))
    });
    group.bench_function("percentiles", |b| {
        b.iter(|| black_box(h.iter_percentiles(5).count()))
    });
    group.finish();
}

criterion_group!(benches, bench_quantiles);
criterion_main!(benches);
