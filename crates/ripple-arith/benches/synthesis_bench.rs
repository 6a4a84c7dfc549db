//! Benchmarks for ripple-carry synthesis
//!
//! Run with: cargo bench -p ripple-arith

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ripple_arith::{ArithConfig, ArithKind, RippleCarry, SynthesisCache, SynthesisKey};

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    for width in &[4usize, 16, 64, 256] {
        let rc = RippleCarry::new(*width, *width).with_overflow(true);
        group.bench_with_input(BenchmarkId::new("adder", width), &rc, |b, rc| {
            b.iter(|| black_box(rc).adder().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("subtractor", width), &rc, |b, rc| {
            b.iter(|| black_box(rc).subtractor().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("comparator", width), &rc, |b, rc| {
            b.iter(|| black_box(rc).comparator().unwrap());
        });
    }

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    for width in &[8usize, 32, 63] {
        let adder = RippleCarry::new(*width, *width).adder().unwrap();
        group.bench_with_input(BenchmarkId::new("adder", width), &adder, |b, adder| {
            b.iter(|| adder.evaluate(black_box(12345), black_box(6789)).unwrap());
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let key = SynthesisKey::new(ArithKind::Adder, 64, 64, ArithConfig::new());
    let mut cache = SynthesisCache::new();
    cache.get_or_synthesize(key).unwrap();

    c.bench_function("cache_hit", |b| {
        b.iter(|| cache.get_or_synthesize(black_box(key)).unwrap());
    });
}

criterion_group!(benches, bench_synthesis, bench_evaluation, bench_cache);
criterion_main!(benches);
