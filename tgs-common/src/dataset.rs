//! # Dataset Ingestion
//!
//! Parses temporal edge records from line-oriented text: whitespace- or
//! comma-separated `source destination weight time`, matching the loosely
//! formatted public temporal-graph edge lists (Wiki, Reddit, Stack Overflow
//! style) this sketch is meant to stream from.
//!
//! Malformed lines are skipped with a structured warning rather than
//! aborting the whole load — ingestion is a best-effort external
//! collaborator, not part of the core's correctness surface.

use crate::edge::{Edge, Timestamp, Weight};

/// A parsed edge record, carrying the source line number for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalEdge {
    pub edge: Edge,
    pub line: usize,
}

/// Parses every line of `text`, skipping malformed records with a `tracing`
/// warning. Returns the successfully parsed edges in file order.
pub fn load_edges(text: &str) -> Vec<TemporalEdge> {
    let mut edges = Vec::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_line(trimmed) {
            Ok(edge) => edges.push(TemporalEdge { edge, line }),
            Err(reason) => {
                tracing::warn!(line, reason = %reason, "skipping malformed dataset record");
            }
        }
    }
    edges
}

/// Splits `edges` (assumed to already be in arrival order) into fixed-size
/// windows, mirroring how the reference harness replays a dataset in
/// batches through both the sketch and the ground-truth engine.
pub fn into_windows(edges: Vec<TemporalEdge>, window_size: usize) -> Vec<Vec<TemporalEdge>> {
    if window_size == 0 {
        return vec![edges];
    }
    edges
        .chunks(window_size)
        .map(|chunk| chunk.to_vec())
        .collect()
}

fn parse_line(line: &str) -> Result<Edge, String> {
    let tokens: Vec<&str> = if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    };

    if tokens.len() < 2 {
        return Err(format!("expected at least 2 columns, found {}", tokens.len()));
    }

    let source: i32 = tokens[0].parse().map_err(|_| format!("non-numeric source {:?}", tokens[0]))?;
    let destination: i32 = tokens[1]
        .parse()
        .map_err(|_| format!("non-numeric destination {:?}", tokens[1]))?;
    let weight: Weight = match tokens.get(2) {
        Some(raw) => raw.parse().map_err(|_| format!("non-numeric weight {:?}", raw))?,
        None => 1,
    };
    let time: Timestamp = match tokens.get(3) {
        Some(raw) => raw.parse().map_err(|_| format!("non-numeric time {:?}", raw))?,
        None => 0,
    };

    Edge::new(source, destination, weight, time).map_err(|err| err.to_string())
}
