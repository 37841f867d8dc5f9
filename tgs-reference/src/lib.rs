//! tgs-reference - An exact, unbounded windowed multigraph used as ground
//! truth for the sketch's approximate answers.
//!
//! Every edge observation is kept verbatim in a per-source adjacency list;
//! there is no hashing, no bucket capacity, and no chain-hashing
//! compensation, so none of the sketch's lossy behavior (overflow, chain
//! collisions) can happen here. This makes it the right-hand side of an
//! average-relative-error comparison, not a drop-in replacement for the
//! sketch — it pays for exactness with unbounded memory.

use hashbrown::HashMap;

use tgs_common::{Edge, Timestamp, VertexId, Weight};

/// Exact windowed multigraph: every edge ever inserted (and not yet
/// expired) is retained, grouped by source vertex.
#[derive(Debug, Default)]
pub struct ReferenceGraph {
    out_adj: HashMap<VertexId, Vec<Edge>>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of edges currently retained, across every vertex.
    pub fn edge_count(&self) -> usize {
        self.out_adj.values().map(Vec::len).sum()
    }

    pub fn insert(&mut self, edge: Edge) {
        self.out_adj.entry(edge.source).or_default().push(edge);
    }

    /// Drops every edge with `time <= te`, across all vertices.
    pub fn expire(&mut self, te: Timestamp) -> u64 {
        let mut dropped = 0u64;
        self.out_adj.retain(|_, edges| {
            let before = edges.len();
            edges.retain(|e| e.time > te);
            dropped += (before - edges.len()) as u64;
            !edges.is_empty()
        });
        dropped
    }

    pub fn query_edge(&self, s: VertexId, d: VertexId, t_b: Timestamp, t_e: Timestamp) -> bool {
        self.out_adj
            .get(&s)
            .is_some_and(|edges| edges.iter().any(|e| e.destination == d && e.in_window(t_b, t_e)))
    }

    pub fn query_vertex_presence(&self, v: VertexId, t_b: Timestamp, t_e: Timestamp) -> bool {
        if self
            .out_adj
            .get(&v)
            .is_some_and(|edges| edges.iter().any(|e| e.in_window(t_b, t_e)))
        {
            return true;
        }
        self.out_adj
            .values()
            .any(|edges| edges.iter().any(|e| e.destination == v && e.in_window(t_b, t_e)))
    }

    pub fn query_vertex_out_weight(&self, v: VertexId, t_b: Timestamp, t_e: Timestamp) -> Weight {
        self.out_adj.get(&v).map_or(0, |edges| {
            edges.iter().filter(|e| e.in_window(t_b, t_e)).map(|e| e.weight).sum()
        })
    }

    pub fn query_vertex_out_degree(&self, v: VertexId, t_b: Timestamp, t_e: Timestamp) -> i64 {
        self.out_adj.get(&v).map_or(0, |edges| {
            edges.iter().filter(|e| e.in_window(t_b, t_e)).count() as i64
        })
    }

    /// Sums weights across a multiset of directed pairs, mirroring the
    /// sketch's -1-on-miss contract so the two results are directly
    /// comparable.
    pub fn query_subgraph(&self, pairs: &[(VertexId, VertexId)], t_b: Timestamp, t_e: Timestamp) -> i64 {
        let mut total = 0i64;
        for &(s, d) in pairs {
            let hit = self
                .out_adj
                .get(&s)
                .and_then(|edges| edges.iter().find(|e| e.destination == d && e.in_window(t_b, t_e)));
            match hit {
                Some(e) => total += e.weight,
                None => return -1,
            }
        }
        total
    }

    /// Exact BFS reachability within `[t_b, t_e]`.
    pub fn query_reachability(&self, source: VertexId, target: VertexId, t_b: Timestamp, t_e: Timestamp) -> bool {
        if source == target {
            return self
                .out_adj
                .get(&source)
                .is_some_and(|edges| edges.iter().any(|e| e.in_window(t_b, t_e)));
        }
        let mut visited = hashbrown::HashSet::new();
        visited.insert(source);
        let mut frontier = std::collections::VecDeque::new();
        frontier.push_back(source);

        while let Some(v) = frontier.pop_front() {
            let Some(edges) = self.out_adj.get(&v) else { continue };
            for e in edges.iter().filter(|e| e.in_window(t_b, t_e)) {
                if e.destination == target {
                    return true;
                }
                if visited.insert(e.destination) {
                    frontier.push_back(e.destination);
                }
            }
        }
        false
    }
}

/// Average relative error between an approximate and exact numeric result,
/// per the design's error metric: `|approx - exact| / exact` when `exact`
/// is non-zero, else `0.0` when both sides agree on zero, else `1.0`.
pub fn relative_error(approx: i64, exact: i64) -> f64 {
    if exact != 0 {
        (approx - exact).unsigned_abs() as f64 / exact.unsigned_abs() as f64
    } else if approx == 0 {
        0.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(n: i32) -> VertexId {
        VertexId::new(n).unwrap()
    }

    #[test]
    fn retains_all_inserted_edges_until_expired() {
        let mut g = ReferenceGraph::new();
        g.insert(Edge::new(1, 2, 5, 10).unwrap());
        g.insert(Edge::new(1, 2, 7, 20).unwrap());
        assert_eq!(g.query_vertex_out_weight(vid(1), 0, 100), 12);

        let dropped = g.expire(15);
        assert_eq!(dropped, 1);
        assert_eq!(g.query_vertex_out_weight(vid(1), 0, 100), 7);
    }

    #[test]
    fn subgraph_matches_sketch_miss_contract() {
        let mut g = ReferenceGraph::new();
        g.insert(Edge::new(1, 2, 4, 1).unwrap());
        let s = vec![(vid(1), vid(2)), (vid(2), vid(3))];
        assert_eq!(g.query_subgraph(&s, 0, 5), -1);
    }

    #[test]
    fn reachability_follows_multi_hop_path() {
        let mut g = ReferenceGraph::new();
        g.insert(Edge::new(1, 2, 1, 1).unwrap());
        g.insert(Edge::new(2, 3, 1, 2).unwrap());
        assert!(g.query_reachability(vid(1), vid(3), 0, 10));
        assert!(!g.query_reachability(vid(3), vid(1), 0, 10));
    }

    #[test]
    fn same_source_and_target_needs_an_outgoing_edge_in_window() {
        let mut g = ReferenceGraph::new();
        assert!(!g.query_reachability(vid(1), vid(1), 0, 10));

        g.insert(Edge::new(1, 2, 1, 1).unwrap());
        assert!(g.query_reachability(vid(1), vid(1), 0, 10));
        assert!(!g.query_reachability(vid(1), vid(1), 5, 10));
    }

    #[test]
    fn relative_error_handles_zero_exact() {
        assert_eq!(relative_error(0, 0), 0.0);
        assert_eq!(relative_error(3, 0), 1.0);
        assert_eq!(relative_error(8, 10), 0.2);
    }
}
