//! Benchmark for the full resolution pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trazar::prelude::*;

fn resolve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_pipeline");
    let registry = Registry::with_defaults();

    for n_series in [1, 8, 64] {
        let columns: Vec<Vec<f32>> = (0..n_series)
            .map(|s| (0..256).map(|i| (i as f32) * (s as f32 + 1.0)).collect())
            .collect();
        let widths: Vec<f32> = (0..n_series).map(|s| s as f32 + 1.0).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(n_series),
            &n_series,
            |b, _| {
                b.iter(|| {
                    registry
                        .resolve(
                            black_box(Value::matrix(columns.clone())),
                            [
                                ("line", Value::from((0.5f32, widths.clone()))),
                                ("legend", Value::Bool(false)),
                            ],
                        )
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn grouped_benchmark(c: &mut Criterion) {
    let registry = Registry::with_defaults();
    let data: Vec<f32> = (0..4096).map(|i| i as f32).collect();
    let labels: Vec<Value> = (0..4096).map(|i| Value::Number((i % 16) as f32)).collect();

    c.bench_function("resolve_grouped_16", |b| {
        b.iter(|| {
            registry
                .resolve(
                    black_box(Value::from(data.clone())),
                    [
                        ("group", Value::List(labels.clone())),
                        ("marker", Value::from((6.0f32, 0.5f32))),
                    ],
                )
                .unwrap()
        });
    });
}

criterion_group!(benches, resolve_benchmark, grouped_benchmark);
criterion_main!(benches);
