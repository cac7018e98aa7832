use criterion::{criterion_group, criterion_main, Criterion};
use mazegrid::{
    generators,
    units::{Height, Width},
};

fn bench_recursive_backtracker_32(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_32", |b| {
        b.iter(|| generators::recursive_backtracker(Width(32), Height(32), Some(97)))
    });
}

fn bench_recursive_backtracker_128(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_128", |b| {
        b.iter(|| generators::recursive_backtracker(Width(128), Height(128), Some(97)))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_32,
    bench_recursive_backtracker_128
);
criterion_main!(benches);
