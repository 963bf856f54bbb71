//! Benchmarks for the renderer crate - equalization, PNG and GeoTIFF encoding.
//!
//! Run with: cargo bench --package renderer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use renderer::{encode_geotiff, render_equalized, render_png, ColorRamp};
use route_common::{BoundingBox, CrsCode, DensityGrid, GeoTransform};

/// Skewed counts: most cells empty, a few very busy corridors.
fn generate_density_grid(width: usize, height: usize) -> DensityGrid {
    let mut rng = rand::thread_rng();
    let cells = (0..width * height)
        .map(|_| {
            if rng.gen_bool(0.7) {
                0
            } else {
                (rng.gen::<f64>().powi(4) * 5_000.0) as u32 + 1
            }
        })
        .collect();
    DensityGrid::from_cells(width, height, cells).unwrap()
}

fn bench_equalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_equalized");
    for size in [256usize, 1024, 2048] {
        let grid = generate_density_grid(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| render_equalized(black_box(grid), ColorRamp::Inferno))
        });
    }
    group.finish();
}

fn bench_encoders(c: &mut Criterion) {
    let grid = generate_density_grid(1024, 1024);
    let transform =
        GeoTransform::from_bounds(&BoundingBox::new(-74.02, 40.70, -73.93, 40.80), 1024, 1024)
            .unwrap();

    let mut group = c.benchmark_group("encode");
    group.sample_size(20);
    group.bench_function("png", |b| {
        b.iter(|| render_png(black_box(&grid), ColorRamp::Viridis).unwrap())
    });
    group.bench_function("geotiff", |b| {
        b.iter(|| encode_geotiff(black_box(&grid), &transform, CrsCode::Epsg4326).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_equalize, bench_encoders);
criterion_main!(benches);
