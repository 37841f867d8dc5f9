//! tgs-cli - wires dataset ingestion, the sketch, and the ground-truth
//! reference engine together behind a small set of subcommands.

mod commands;
mod config;
mod sampler;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tgs", about = "Temporal graph sketch command-line tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a dataset into a freshly constructed matrix and print load statistics.
    Ingest(commands::ingest::IngestArgs),
    /// Run one ad-hoc query against a matrix populated from a dataset.
    Query(commands::query::QueryArgs),
    /// Replay a dataset through the sketch and the reference engine and report approximation error.
    Compare(commands::compare::CompareArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Ingest(args) => commands::ingest::run(args),
        Command::Query(args) => commands::query::run(args),
        Command::Compare(args) => commands::compare::run(args),
    }
}
