use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{build_and_ingest, load_dataset, MatrixArgs};

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Path to a temporal edge dataset file.
    pub path: PathBuf,

    #[command(flatten)]
    pub matrix: MatrixArgs,
}

pub fn run(args: IngestArgs) -> Result<()> {
    let edges = load_dataset(&args.path)?;
    let config = args.matrix.resolve();
    let matrix = build_and_ingest(&edges, &config)?;

    let diagnostics = matrix.diagnostics();
    println!("dataset:           {}", args.path.display());
    println!("records parsed:    {}", edges.len());
    println!("claimed buckets:   {}", diagnostics.claims());
    println!("reused buckets:    {}", diagnostics.reuses());
    println!("overflow drops:    {}", diagnostics.overflows());
    println!("avg chain length:  {:.3}", matrix.avg_chain_length());
    println!("matrix dimension:  {}", matrix.dim());

    Ok(())
}
