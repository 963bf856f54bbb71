//! Benchmarks for route rasterization and accumulation.
//!
//! Run with: cargo bench --package rasterizer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rasterizer::{build_transform, compute_envelope, rasterize_all, rasterize_line, RasterizeOptions};
use route_common::BoundingBox;
use test_utils::random_routes;

fn bench_rasterize_line(c: &mut Criterion) {
    let bbox = BoundingBox::new(-74.02, 40.70, -73.93, 40.80);
    let routes = random_routes(1, &bbox, 50, 7);
    let envelope = compute_envelope(&routes).unwrap();

    let mut group = c.benchmark_group("rasterize_line");
    for size in [256usize, 1024, 4096] {
        let transform = build_transform(&envelope, size, size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| rasterize_line(black_box(&routes[0]), &transform, size, size))
        });
    }
    group.finish();
}

fn bench_rasterize_all(c: &mut Criterion) {
    let bbox = BoundingBox::new(-74.02, 40.70, -73.93, 40.80);
    let routes = random_routes(2_000, &bbox, 20, 11);
    let envelope = compute_envelope(&routes).unwrap();
    let transform = build_transform(&envelope, 1000, 1000).unwrap();

    let mut group = c.benchmark_group("rasterize_all");
    group.throughput(Throughput::Elements(routes.len() as u64));
    group.sample_size(20);

    for (name, options) in [
        ("sequential", RasterizeOptions::sequential()),
        ("parallel", RasterizeOptions::default()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| rasterize_all(black_box(&routes), &transform, 1000, 1000, options).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rasterize_line, bench_rasterize_all);
criterion_main!(benches);
