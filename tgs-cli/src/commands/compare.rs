//! Replays a dataset through both the sketch and the exact reference
//! engine, samples queries of each kind, and reports the approximation
//! metrics the original research harness tracked: average relative error
//! per query family, reachability precision, throughput, and a rough
//! memory estimate.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tgs_core::{ExpiryStrategy, SearchOrder};
use tgs_reference::{relative_error, ReferenceGraph};

use super::{load_dataset, MatrixArgs};
use crate::sampler::XorShift64;

/// Bytes assumed per occupied matrix cell for the memory estimate. A rough
/// order-of-magnitude figure, not a `size_of::<Bucket>()` measurement —
/// the bucket layout is private to `tgs-core`.
const ASSUMED_BUCKET_BYTES: usize = 96;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to a temporal edge dataset.
    pub path: PathBuf,

    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Number of sampled queries per query family.
    #[arg(long, default_value_t = 200)]
    pub samples: usize,

    /// Query time window span, relative to the dataset's own time range.
    #[arg(long, default_value_t = 100 * 86_400)]
    pub query_time_range: i64,

    /// PRNG seed for query sampling (deterministic across runs by default).
    #[arg(long, default_value_t = 0x1234_5678_9abc_def0)]
    pub seed: u64,
}

struct Report {
    are_edge: f64,
    are_vertex_weight: f64,
    are_subgraph: f64,
    reachability_precision: f64,
    throughput_ops_per_sec: f64,
    memory_estimate_bytes: usize,
}

pub fn run(args: CompareArgs) -> Result<()> {
    let edges = load_dataset(&args.path)?;
    if edges.is_empty() {
        println!("dataset is empty, nothing to compare");
        return Ok(());
    }

    let config = args.matrix.resolve();
    let mut matrix = tgs_core::Matrix::new(config.clone())?;
    let mut reference = ReferenceGraph::new();
    let mut rng = XorShift64::new(args.seed);

    let start = Instant::now();
    for temporal in &edges {
        matrix.insert(temporal.edge);
        reference.insert(temporal.edge);
        let horizon = temporal.edge.time - config.expiration_threshold;
        matrix.expire(horizon, ExpiryStrategy::Rolling);
        reference.expire(horizon);
    }
    let ingest_elapsed = start.elapsed();

    let max_time = edges.iter().map(|e| e.edge.time).max().unwrap_or(0);
    let min_time = edges.iter().map(|e| e.edge.time).min().unwrap_or(0);

    let mut edge_error_sum = 0.0;
    let mut vertex_error_sum = 0.0;
    let mut subgraph_error_sum = 0.0;
    let mut reach_hits = 0usize;
    let mut query_ops = 0usize;

    for _ in 0..args.samples {
        let sample = &edges[rng.next_index(edges.len())].edge;
        let (t_b, t_e) = sample_window(&mut rng, min_time, max_time, args.query_time_range);

        let sketch_edge = matrix.query_edge(sample.source, sample.destination, t_b, t_e);
        let truth_edge = reference.query_edge(sample.source, sample.destination, t_b, t_e);
        edge_error_sum += if sketch_edge == truth_edge { 0.0 } else { 1.0 };
        query_ops += 1;

        let sketch_weight = matrix.query_vertex_out_weight(sample.source, t_b, t_e);
        let truth_weight = reference.query_vertex_out_weight(sample.source, t_b, t_e);
        vertex_error_sum += relative_error(sketch_weight, truth_weight);
        query_ops += 1;
    }

    for _ in 0..args.samples {
        let a = &edges[rng.next_index(edges.len())].edge;
        let b = &edges[rng.next_index(edges.len())].edge;
        let pairs = [
            (a.source, a.destination),
            (b.source, b.destination),
        ];
        let (t_b, t_e) = sample_window(&mut rng, min_time, max_time, args.query_time_range);

        let sketch_result = matrix.query_subgraph(&pairs, t_b, t_e);
        let truth_result = reference.query_subgraph(&pairs, t_b, t_e);
        subgraph_error_sum += relative_error(sketch_result, truth_result);
        query_ops += 1;
    }

    let mut reach_samples = 0usize;
    for _ in 0..args.samples {
        let a = &edges[rng.next_index(edges.len())].edge;
        let b = &edges[rng.next_index(edges.len())].edge;
        let (t_b, t_e) = sample_window(&mut rng, min_time, max_time, args.query_time_range);

        let sketch_result = matrix
            .query_reachability(a.source, b.destination, t_b, t_e, SearchOrder::Bfs, Some(1_000))
            .reachable;
        let truth_result = reference.query_reachability(a.source, b.destination, t_b, t_e);
        if sketch_result == truth_result {
            reach_hits += 1;
        }
        reach_samples += 1;
        query_ops += 1;
    }

    let total_ops = edges.len() + query_ops;
    let total_seconds = ingest_elapsed.as_secs_f64().max(f64::EPSILON);

    let report = Report {
        are_edge: edge_error_sum / args.samples as f64,
        are_vertex_weight: vertex_error_sum / args.samples as f64,
        are_subgraph: subgraph_error_sum / args.samples as f64,
        reachability_precision: reach_hits as f64 / reach_samples.max(1) as f64,
        throughput_ops_per_sec: total_ops as f64 / total_seconds,
        memory_estimate_bytes: matrix.dim() * matrix.dim() * ASSUMED_BUCKET_BYTES,
    };

    print_report(&args.path, &report, &matrix);
    Ok(())
}

fn sample_window(rng: &mut XorShift64, min_time: i64, max_time: i64, range: i64) -> (i64, i64) {
    let span = (max_time - min_time).max(1).min(range.max(1));
    let t_b = min_time + (rng.next_u64() as i64).rem_euclid(span.max(1));
    let t_e = t_b + (rng.next_u64() as i64).rem_euclid(span.max(1));
    (t_b, t_e)
}

fn print_report(path: &std::path::Path, report: &Report, matrix: &tgs_core::Matrix) {
    println!("dataset:                      {}", path.display());
    println!("ARE (edge queries):           {:.6}", report.are_edge);
    println!("ARE (vertex out-weight):      {:.6}", report.are_vertex_weight);
    println!("ARE (subgraph queries):       {:.6}", report.are_subgraph);
    println!("reachability precision:      {:.6}", report.reachability_precision);
    println!("throughput (ops/s):           {:.1}", report.throughput_ops_per_sec);
    println!("memory estimate (bytes):      {}", report.memory_estimate_bytes);
    println!("overflow drops:               {}", matrix.diagnostics().overflows());
    println!("avg chain length:             {:.3}", matrix.avg_chain_length());
}
