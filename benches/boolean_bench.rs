//! Criterion benchmarks for the AND strategies.
//!
//! Run with: `cargo bench --bench boolean_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rlebw::{Color, Image};

fn bench_and(c: &mut Criterion) {
    let mut group = c.benchmark_group("and");

    for edge in [1u32, 2, 16, 256] {
        let a = Image::chessboard(256, 256, edge, Color::Black).unwrap();
        let b = Image::chessboard(256, 256, edge, Color::White).unwrap();

        group.bench_with_input(BenchmarkId::new("decompress", edge), &edge, |bench, _| {
            bench.iter(|| black_box(&a).and(black_box(&b)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("merge", edge), &edge, |bench, _| {
            bench.iter(|| black_box(&a).and_merge(black_box(&b)).unwrap());
        });
    }

    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let img = Image::chessboard(512, 512, 4, Color::White).unwrap();

    c.bench_function("vertical_mirror", |b| {
        b.iter(|| black_box(&img).vertical_mirror());
    });
    c.bench_function("replicate_at_right", |b| {
        b.iter(|| black_box(&img).replicate_at_right(black_box(&img)).unwrap());
    });
}

criterion_group!(benches, bench_and, bench_transforms);
criterion_main!(benches);
