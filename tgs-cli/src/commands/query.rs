use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use tgs_common::VertexId;
use tgs_core::SearchOrder;

use super::{build_and_ingest, load_dataset, MatrixArgs};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Path to a temporal edge dataset used to populate the matrix before querying.
    pub dataset: PathBuf,

    #[command(flatten)]
    pub matrix: MatrixArgs,

    #[command(subcommand)]
    pub kind: QueryKind,
}

#[derive(Subcommand, Debug)]
pub enum QueryKind {
    /// Does edge (source, destination) exist within the window?
    Edge {
        source: i32,
        destination: i32,
        t_b: i64,
        t_e: i64,
    },
    /// Presence, outgoing weight, and outgoing degree for a vertex.
    Vertex { v: i32, t_b: i64, t_e: i64 },
    /// Subgraph match: a comma-separated list of "source:destination" pairs.
    Subgraph {
        #[arg(value_delimiter = ',')]
        pairs: Vec<String>,
        t_b: i64,
        t_e: i64,
    },
    /// Is `target` reachable from `source` within the window?
    Reach {
        source: i32,
        target: i32,
        t_b: i64,
        t_e: i64,
        /// Maximum number of vertices to visit before giving up.
        #[arg(long)]
        step_budget: Option<usize>,
        /// Use depth-first search instead of breadth-first.
        #[arg(long)]
        dfs: bool,
    },
}

pub fn run(args: QueryArgs) -> Result<()> {
    let edges = load_dataset(&args.dataset)?;
    let config = args.matrix.resolve();
    let matrix = build_and_ingest(&edges, &config)?;

    match args.kind {
        QueryKind::Edge {
            source,
            destination,
            t_b,
            t_e,
        } => {
            let s = VertexId::new(source)?;
            let d = VertexId::new(destination)?;
            println!("{}", matrix.query_edge(s, d, t_b, t_e));
        }
        QueryKind::Vertex { v, t_b, t_e } => {
            let v = VertexId::new(v)?;
            println!("present:    {}", matrix.query_vertex_presence(v, t_b, t_e));
            println!("out_weight: {}", matrix.query_vertex_out_weight(v, t_b, t_e));
            println!("out_degree: {}", matrix.query_vertex_out_degree(v, t_b, t_e));
        }
        QueryKind::Subgraph { pairs, t_b, t_e } => {
            let parsed = parse_pairs(&pairs)?;
            println!("{}", matrix.query_subgraph(&parsed, t_b, t_e));
        }
        QueryKind::Reach {
            source,
            target,
            t_b,
            t_e,
            step_budget,
            dfs,
        } => {
            let s = VertexId::new(source)?;
            let t = VertexId::new(target)?;
            let order = if dfs { SearchOrder::Dfs } else { SearchOrder::Bfs };
            let result = matrix.query_reachability(s, t, t_b, t_e, order, step_budget);
            println!("reachable:        {}", result.reachable);
            println!("steps_taken:      {}", result.steps_taken);
            println!("budget_exhausted: {}", result.budget_exhausted);
        }
    }

    Ok(())
}

fn parse_pairs(raw: &[String]) -> Result<Vec<(VertexId, VertexId)>> {
    raw.iter()
        .map(|entry| {
            let (s, d) = entry
                .split_once(':')
                .with_context(|| format!("expected \"source:destination\", got {entry:?}"))?;
            let s: i32 = s.parse().with_context(|| format!("non-numeric source in {entry:?}"))?;
            let d: i32 = d
                .parse()
                .with_context(|| format!("non-numeric destination in {entry:?}"))?;
            Ok((VertexId::new(s)?, VertexId::new(d)?))
        })
        .collect::<Result<Vec<_>>>()
        .and_then(|pairs| {
            if pairs.is_empty() {
                bail!("subgraph query requires at least one source:destination pair");
            }
            Ok(pairs)
        })
}
