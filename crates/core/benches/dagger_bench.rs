//! Benchmarks for cache generation, dataset item derivation, and the
//! hashimoto mixing loop.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dagger_core::{Cache, Dataset, dataset_item, dataset_item_opt, digest512, hashimoto_full};

fn bench_cache_generation(c: &mut Criterion) {
    c.bench_function("cache_64kib", |b| {
        b.iter(|| Cache::generate(black_box(64 * 1024), black_box(b"123")).unwrap())
    });
}

fn bench_dataset_item(c: &mut Criterion) {
    let cache = Cache::generate(1 << 20, b"123").unwrap();

    c.bench_function("dataset_item_ref", |b| {
        let mut index: u64 = 0;
        b.iter(|| {
            index = index.wrapping_add(1);
            dataset_item(black_box(&cache), index)
        })
    });

    c.bench_function("dataset_item_opt", |b| {
        let mut index: u64 = 0;
        b.iter(|| {
            index = index.wrapping_add(1);
            dataset_item_opt(black_box(&cache), index)
        })
    });
}

fn bench_hashimoto(c: &mut Criterion) {
    let cache = Cache::generate(64 * 1024, b"123").unwrap();
    let dataset = Dataset::materialize(&cache, 64 * 1024).unwrap();
    let candidate = digest512(b"123");

    c.bench_function("hashimoto_full", |b| {
        b.iter(|| hashimoto_full(black_box(&candidate), &dataset))
    });
}

criterion_group!(
    benches,
    bench_cache_generation,
    bench_dataset_item,
    bench_hashimoto
);
criterion_main!(benches);
