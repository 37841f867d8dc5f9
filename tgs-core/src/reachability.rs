//! # Reachability
//!
//! Windowed BFS/DFS reachability over the sketch's lossy edge view. Since
//! the matrix only ever answers "does this directed pair have a live edge
//! in this window", reachability here is itself approximate: a false
//! negative is possible whenever chain-hashing compensation overflowed and
//! dropped the edge that would have extended the path.

use std::collections::VecDeque;

use hashbrown::HashSet;
use tgs_common::{Timestamp, VertexId};

use crate::matrix::Matrix;

/// Search order for [`Matrix::query_reachability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    Bfs,
    Dfs,
}

/// Outcome of a bounded reachability search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityResult {
    pub reachable: bool,
    /// Number of vertices dequeued/popped before the search stopped — either
    /// because `target` was found, the frontier was exhausted, or the step
    /// budget ran out.
    pub steps_taken: usize,
    /// True if the search stopped because `step_budget` was exhausted
    /// without finding `target` — a result of `reachable: false` in this
    /// case is inconclusive, not a proof of unreachability.
    pub budget_exhausted: bool,
}

impl Matrix {
    /// Every outgoing neighbor of `v` with at least one edge in
    /// `[t_b, t_e]`, found by scanning `v`'s compensated row the same way
    /// insertion and the other queries do.
    fn neighbors_in_window(&self, v: VertexId, t_b: Timestamp, t_e: Timestamp) -> Vec<VertexId> {
        let mut out = Vec::new();
        let base_row = self.hasher.map(v, self.dim);
        for row in self.probe_rows(base_row) {
            for col in 0..self.dim {
                let idx = self.index(row, col);
                if let Some((s, d)) = self.buckets[idx].vx {
                    if s == v && self.buckets[idx].list.iter().any(|e| e.in_window(t_b, t_e)) {
                        out.push(d);
                    }
                }
            }
        }
        out
    }

    /// Searches for a directed path from `source` to `target` using only
    /// edges live in `[t_b, t_e]`, stopping early once `step_budget` vertices
    /// have been visited (`None` means unbounded).
    pub fn query_reachability(
        &self,
        source: VertexId,
        target: VertexId,
        t_b: Timestamp,
        t_e: Timestamp,
        order: SearchOrder,
        step_budget: Option<usize>,
    ) -> ReachabilityResult {
        if source == target {
            let has_outgoing = !self.neighbors_in_window(source, t_b, t_e).is_empty();
            return ReachabilityResult {
                reachable: has_outgoing,
                steps_taken: 0,
                budget_exhausted: false,
            };
        }

        let mut visited = HashSet::new();
        visited.insert(source);
        let mut frontier: VecDeque<VertexId> = VecDeque::new();
        frontier.push_back(source);
        let mut steps = 0usize;

        while let Some(v) = match order {
            SearchOrder::Bfs => frontier.pop_front(),
            SearchOrder::Dfs => frontier.pop_back(),
        } {
            if let Some(budget) = step_budget {
                if steps >= budget {
                    return ReachabilityResult {
                        reachable: false,
                        steps_taken: steps,
                        budget_exhausted: true,
                    };
                }
            }
            steps += 1;

            for next in self.neighbors_in_window(v, t_b, t_e) {
                if next == target {
                    return ReachabilityResult {
                        reachable: true,
                        steps_taken: steps,
                        budget_exhausted: false,
                    };
                }
                if visited.insert(next) {
                    frontier.push_back(next);
                }
            }
        }

        ReachabilityResult {
            reachable: false,
            steps_taken: steps,
            budget_exhausted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgs_common::Edge;

    fn vid(n: i32) -> VertexId {
        VertexId::new(n).unwrap()
    }

    #[test]
    fn finds_multi_hop_path_bfs() {
        let mut m = Matrix::with_dim(64, 1);
        m.insert(Edge::new(1, 2, 1, 1).unwrap());
        m.insert(Edge::new(2, 3, 1, 2).unwrap());
        m.insert(Edge::new(3, 4, 1, 3).unwrap());

        let r = m.query_reachability(vid(1), vid(4), 0, 10, SearchOrder::Bfs, None);
        assert!(r.reachable);
    }

    #[test]
    fn unreachable_when_window_excludes_middle_edge() {
        let mut m = Matrix::with_dim(64, 1);
        m.insert(Edge::new(1, 2, 1, 1).unwrap());
        m.insert(Edge::new(2, 3, 1, 20).unwrap());

        let r = m.query_reachability(vid(1), vid(3), 0, 5, SearchOrder::Bfs, None);
        assert!(!r.reachable);
    }

    #[test]
    fn same_source_and_target_needs_an_outgoing_edge_in_window() {
        let mut m = Matrix::with_dim(8, 1);
        let r = m.query_reachability(vid(1), vid(1), 0, 10, SearchOrder::Bfs, None);
        assert!(!r.reachable, "no edges at all: s==t must not be trivially reachable");

        m.insert(Edge::new(1, 2, 1, 1).unwrap());
        let r = m.query_reachability(vid(1), vid(1), 0, 10, SearchOrder::Bfs, None);
        assert!(r.reachable, "an outgoing edge in window makes s==t reachable");
        assert_eq!(r.steps_taken, 0);

        let r = m.query_reachability(vid(1), vid(1), 5, 10, SearchOrder::Bfs, None);
        assert!(!r.reachable, "outgoing edge outside the window must not count");
    }

    #[test]
    fn step_budget_stops_search_and_flags_inconclusive() {
        let mut m = Matrix::with_dim(64, 1);
        m.insert(Edge::new(1, 2, 1, 1).unwrap());
        m.insert(Edge::new(2, 3, 1, 2).unwrap());
        m.insert(Edge::new(3, 4, 1, 3).unwrap());

        let r = m.query_reachability(vid(1), vid(4), 0, 10, SearchOrder::Bfs, Some(1));
        assert!(!r.reachable);
        assert!(r.budget_exhausted);
    }

    #[test]
    fn dfs_and_bfs_agree_on_reachability_outcome() {
        let mut m = Matrix::with_dim(64, 1);
        m.insert(Edge::new(1, 2, 1, 1).unwrap());
        m.insert(Edge::new(1, 3, 1, 1).unwrap());
        m.insert(Edge::new(3, 4, 1, 2).unwrap());

        let bfs = m.query_reachability(vid(1), vid(4), 0, 10, SearchOrder::Bfs, None);
        let dfs = m.query_reachability(vid(1), vid(4), 0, 10, SearchOrder::Dfs, None);
        assert_eq!(bfs.reachable, dfs.reachable);
    }
}
