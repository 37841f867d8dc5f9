pub mod compare;
pub mod ingest;
pub mod query;

use std::fs;

use anyhow::{Context, Result};
use tgs_common::{load_edges, SketchConfig, TemporalEdge};
use tgs_core::Matrix;

/// Shared CLI flags for resolving a [`SketchConfig`], reused by every
/// subcommand that constructs a matrix.
#[derive(clap::Args, Debug)]
pub struct MatrixArgs {
    /// Explicit matrix side N, overrides --memory-budget-bytes.
    #[arg(long)]
    pub dim: Option<usize>,
    /// Memory budget in bytes used to derive N when --dim is unset.
    #[arg(long)]
    pub memory_budget_bytes: Option<usize>,
    /// Chain-hashing compensation window g.
    #[arg(long)]
    pub chain_g: Option<usize>,
    /// Eviction threshold in caller time units, subtracted from the dataset's max timestamp.
    #[arg(long)]
    pub expiration_threshold: Option<i64>,
}

impl MatrixArgs {
    pub fn resolve(&self) -> SketchConfig {
        crate::config::resolve_sketch_config(
            self.dim,
            self.memory_budget_bytes,
            self.chain_g,
            self.expiration_threshold,
        )
    }
}

/// Reads and parses a dataset file, logging how many records survived.
pub fn load_dataset(path: &std::path::Path) -> Result<Vec<TemporalEdge>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file: {}", path.display()))?;
    let edges = load_edges(&text);
    tracing::info!(path = %path.display(), edges = edges.len(), "dataset loaded");
    Ok(edges)
}

/// Builds a matrix and replays `edges` through it, draining expired edges
/// after each record using the dataset's own expiration threshold.
pub fn build_and_ingest(edges: &[TemporalEdge], config: &SketchConfig) -> Result<Matrix> {
    let mut matrix = Matrix::new(config.clone())?;
    for temporal in edges {
        matrix.insert(temporal.edge);
        let horizon = temporal.edge.time - config.expiration_threshold;
        matrix.expire(horizon, tgs_core::ExpiryStrategy::Rolling);
    }
    Ok(matrix)
}
