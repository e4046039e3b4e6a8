//! Benchmarks for gravity_core.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gravity_core::math::correlation::goodness_of_fit;
use gravity_core::math::geo::{haversine_km, GeoPoint};
use gravity_core::model::GravityModel;
use gravity_core::network::{FlowRecord, InteractionMatrixBuilder, Point};

fn generate_points(count: usize) -> Vec<Point> {
    (0..count)
        .map(|k| {
            let lon = -10.0 + (k as f64 * 0.37) % 20.0;
            let lat = 35.0 + (k as f64 * 0.61) % 20.0;
            Point::new(format!("P{k}"), lon, lat)
        })
        .collect()
}

fn generate_flows(points: &[Point]) -> Vec<FlowRecord> {
    let mut flows = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let value = ((i + 1) * (j + 3) % 211) as f64;
            flows.push(FlowRecord::new(points[i].id.clone(), points[j].id.clone(), value));
        }
    }
    flows
}

fn benchmark_haversine(c: &mut Criterion) {
    let a = GeoPoint::new(-0.1278, 51.5074);
    let b = GeoPoint::new(2.3522, 48.8566);
    c.bench_function("haversine_km", |bench| {
        bench.iter(|| haversine_km(black_box(a), black_box(b)))
    });
}

fn benchmark_goodness_of_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("goodness_of_fit");
    for size in [100, 1_000, 10_000] {
        let x: Vec<f64> = (0..size).map(|k| (k as f64).sqrt()).collect();
        let y: Vec<f64> = (0..size).map(|k| (k as f64 * 0.7).ln_1p()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &(x, y), |b, (x, y)| {
            b.iter(|| goodness_of_fit(black_box(x.as_slice()), black_box(y.as_slice())))
        });
    }
    group.finish();
}

fn benchmark_matrix_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_build");
    for nodes in [20, 50, 100] {
        let points = generate_points(nodes);
        let flows = generate_flows(&points);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &flows, |b, flows| {
            b.iter(|| InteractionMatrixBuilder::new(&points).build(black_box(flows)))
        });
    }
    group.finish();
}

fn benchmark_kernel_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_score");
    for nodes in [20, 50, 100] {
        let points = generate_points(nodes);
        let matrix = InteractionMatrixBuilder::new(&points)
            .build(&generate_flows(&points))
            .unwrap();
        let kernel = GravityModel::new(1.2).kernel(&matrix);
        let masses: Vec<f64> = (0..nodes).map(|k| 10.0 + k as f64).collect();
        let mut scratch = Vec::new();
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &masses, |b, m| {
            b.iter(|| kernel.score_with(black_box(m), &mut scratch))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_haversine,
    benchmark_goodness_of_fit,
    benchmark_matrix_build,
    benchmark_kernel_score,
);
criterion_main!(benches);
