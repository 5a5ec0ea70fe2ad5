//! Acquire/release cycle throughput

use bounded_pool::BoundedPool;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn uncontended(c: &mut Criterion) {
    let pool = BoundedPool::new((0..16u64).collect::<Vec<_>>()).expect("non-empty item set");

    c.bench_function("acquire_release_uncontended", |b| {
        b.iter(|| {
            let item = pool.acquire();
            black_box(*item);
        })
    });
}

fn try_acquire_hit(c: &mut Criterion) {
    let pool = BoundedPool::new(vec![0u64]).expect("non-empty item set");

    c.bench_function("try_acquire_hit", |b| {
        b.iter(|| black_box(pool.try_acquire()).is_some())
    });
}

criterion_group!(benches, uncontended, try_acquire_hit);
criterion_main!(benches);
