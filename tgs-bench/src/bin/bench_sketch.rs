//! # Sketch Benchmark Harness
//!
//! Purpose: a dependency-free, repeatable benchmark driver for the sketch,
//! so baseline throughput and approximation quality can be compared over
//! time without needing an external dataset or harness.
//!
//! ## Design Principles
//! 1. **Deterministic workload**: fixed PRNG seed for stable comparisons.
//! 2. **Allocation control**: pre-build the edge stream to keep setup costs
//!    off the hot path.
//! 3. **Dual replay**: every edge is replayed through both the sketch and
//!    the exact reference engine, so accuracy metrics come for free
//!    alongside throughput.

use std::env;
use std::hint::black_box;
use std::time::Instant;

use tgs_common::{Edge, SketchConfig};
use tgs_core::{ExpiryStrategy, Matrix};
use tgs_reference::{relative_error, ReferenceGraph};

const DEFAULT_VERTEX_COUNT: usize = 1 << 12;
const DEFAULT_EDGE_COUNT: usize = 200_000;
const DEFAULT_EXPIRATION_THRESHOLD: i64 = 1_000;

struct BenchConfig {
    vertex_count: usize,
    edge_count: usize,
    chain_g: usize,
}

impl BenchConfig {
    fn from_args() -> Self {
        let mut args = env::args().skip(1);
        let vertex_count = parse_usize(args.next(), DEFAULT_VERTEX_COUNT);
        let edge_count = parse_usize(args.next(), DEFAULT_EDGE_COUNT);
        let chain_g = parse_usize(args.next(), 1);
        BenchConfig {
            vertex_count,
            edge_count,
            chain_g,
        }
    }
}

fn parse_usize(value: Option<String>, fallback: usize) -> usize {
    value.and_then(|raw| raw.parse().ok()).unwrap_or(fallback)
}

/// Tiny deterministic PRNG used to avoid external dependencies.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_index(&mut self, mask: usize) -> usize {
        (self.next_u64() as usize) & mask
    }
}

fn build_edge_stream(config: &BenchConfig) -> Vec<Edge> {
    let mut rng = XorShift64::new(0xA5A5_A5A5_A5A5_A5A5);
    let vertex_mask = config.vertex_count.next_power_of_two() - 1;
    let mut edges = Vec::with_capacity(config.edge_count);

    for t in 0..config.edge_count {
        let s = (rng.next_index(vertex_mask) as i32) + 1;
        let d = (rng.next_index(vertex_mask) as i32) + 1;
        let weight = (rng.next_u64() % 100) as i64 + 1;
        edges.push(Edge::new(s, d, weight, t as i64).expect("nonzero by construction"));
    }
    edges
}

fn report(label: &str, ops: usize, elapsed: std::time::Duration) {
    let secs = elapsed.as_secs_f64();
    let ops_per_sec = (ops as f64) / secs;
    let nanos_per_op = (secs * 1e9) / (ops as f64);
    println!("{label}: {ops} ops in {secs:.3}s ({ops_per_sec:.0} ops/s, {nanos_per_op:.1} ns/op)");
}

fn main() {
    let config = BenchConfig::from_args();
    let edges = build_edge_stream(&config);

    println!(
        "vertices: requested={}, edges={}, chain_g={}",
        config.vertex_count, config.edge_count, config.chain_g
    );

    let sketch_config = SketchConfig {
        dim: None,
        memory_budget_bytes: Some(20 * 1024 * 1024),
        chain_g: config.chain_g,
        expiration_threshold: DEFAULT_EXPIRATION_THRESHOLD,
    };
    let mut matrix = Matrix::new(sketch_config).expect("valid sketch config");
    let mut reference = ReferenceGraph::new();

    let start = Instant::now();
    for edge in &edges {
        black_box(matrix.insert(*edge));
        reference.insert(*edge);
        matrix.expire(edge.time - DEFAULT_EXPIRATION_THRESHOLD, ExpiryStrategy::Rolling);
        reference.expire(edge.time - DEFAULT_EXPIRATION_THRESHOLD);
    }
    report("INSERT+EXPIRE", edges.len(), start.elapsed());

    let diagnostics = matrix.diagnostics();
    println!(
        "claims={} reuses={} overflows={} avg_chain_length={:.3}",
        diagnostics.claims(),
        diagnostics.reuses(),
        diagnostics.overflows(),
        matrix.avg_chain_length()
    );

    let mut rng = XorShift64::new(0x0FED_CBA9_8765_4321);
    let sample_count = edges.len().min(20_000);
    let mut edge_error = 0.0;
    let mut weight_error = 0.0;

    let start = Instant::now();
    for _ in 0..sample_count {
        let e = &edges[rng.next_index(edges.len().next_power_of_two() - 1) % edges.len()];
        let sketch_hit = matrix.query_edge(e.source, e.destination, 0, edges.len() as i64);
        let truth_hit = reference.query_edge(e.source, e.destination, 0, edges.len() as i64);
        edge_error += if sketch_hit == truth_hit { 0.0 } else { 1.0 };

        let sketch_weight = matrix.query_vertex_out_weight(e.source, 0, edges.len() as i64);
        let truth_weight = reference.query_vertex_out_weight(e.source, 0, edges.len() as i64);
        weight_error += relative_error(sketch_weight, truth_weight);
    }
    report("QUERY", sample_count * 2, start.elapsed());

    println!("ARE (edge existence):      {:.6}", edge_error / sample_count as f64);
    println!("ARE (vertex out-weight):   {:.6}", weight_error / sample_count as f64);
}
