//! Criterion micro-benchmarks for individual sketch operations: insertion,
//! each expiry strategy, and each query kind, isolated from the
//! dependency-free throughput harness so regressions on a single operation
//! are easy to spot.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tgs_common::{Edge, SketchConfig};
use tgs_core::{ExpiryStrategy, Matrix};

fn populated_matrix(edge_count: i64) -> Matrix {
    let config = SketchConfig {
        dim: Some(512),
        memory_budget_bytes: None,
        chain_g: 2,
        expiration_threshold: edge_count,
    };
    let mut matrix = Matrix::new(config).unwrap();
    for t in 0..edge_count {
        let s = (t % 400) + 1;
        let d = ((t * 7) % 400) + 1;
        matrix.insert(Edge::new(s as i32, d as i32, 1, t).unwrap());
    }
    matrix
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &size in &[1_000i64, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut matrix = Matrix::with_dim(512, 2);
                for t in 0..size {
                    let s = (t % 400) + 1;
                    let d = ((t * 7) % 400) + 1;
                    black_box(matrix.insert(Edge::new(s as i32, d as i32, 1, t).unwrap()));
                }
            });
        });
    }
    group.finish();
}

fn bench_expiry_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiry");
    for strategy_name in ["rolling", "full_scan"] {
        group.bench_function(strategy_name, |b| {
            b.iter_batched(
                || populated_matrix(5_000),
                |mut matrix| {
                    let strategy = if strategy_name == "rolling" {
                        ExpiryStrategy::Rolling
                    } else {
                        ExpiryStrategy::FullScan
                    };
                    black_box(matrix.expire(2_500, strategy));
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let matrix = populated_matrix(5_000);
    let s = tgs_common::VertexId::new(42).unwrap();
    let d = tgs_common::VertexId::new(((42 * 7) % 400) + 1).unwrap();

    let mut group = c.benchmark_group("query");
    group.bench_function("query_edge", |b| {
        b.iter(|| black_box(matrix.query_edge(s, d, 0, 5_000)));
    });
    group.bench_function("query_vertex_out_weight", |b| {
        b.iter(|| black_box(matrix.query_vertex_out_weight(s, 0, 5_000)));
    });
    group.bench_function("query_reachability", |b| {
        b.iter(|| {
            black_box(matrix.query_reachability(
                s,
                d,
                0,
                5_000,
                tgs_core::SearchOrder::Bfs,
                Some(64),
            ))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_expiry_strategies, bench_queries);
criterion_main!(benches);
