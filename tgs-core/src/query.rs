//! # Query Surface
//!
//! Edge-existence, vertex weight/degree/presence, and subgraph queries.
//! Reachability lives in its own module since it composes these primitives
//! into a graph search.
//!
//! Every query is pure with respect to the matrix: none of them piggyback
//! lazy expiry, so a malformed window (`t_b > t_e`) needs no special case —
//! `Edge::in_window` is simply never true for any edge, which makes every
//! query here fall through to its natural "nothing matched" result (false,
//! zero, or the subgraph sentinel `-1`).

use tgs_common::{Timestamp, VertexId, Weight};

use crate::matrix::Matrix;

impl Matrix {
    /// True iff edge `(s, d)` has at least one observation in `[t_b, t_e]`.
    pub fn query_edge(&self, s: VertexId, d: VertexId, t_b: Timestamp, t_e: Timestamp) -> bool {
        match self.locate(s, d) {
            Some(idx) => self.buckets[idx].list.iter().any(|e| e.in_window(t_b, t_e)),
            None => false,
        }
    }

    /// True iff `v` appears as either endpoint of some edge in `[t_b, t_e]`,
    /// scanning the row-compensated window the same way insertion placed
    /// edges sourced at `v`. Edges where `v` is only ever a destination are
    /// found only incidentally — by design, this is the sketch's
    /// approximate, lossy notion of vertex presence.
    pub fn query_vertex_presence(&self, v: VertexId, t_b: Timestamp, t_e: Timestamp) -> bool {
        let base_row = self.hasher.map(v, self.dim);
        for row in self.probe_rows(base_row) {
            for col in 0..self.dim {
                let idx = self.index(row, col);
                if let Some((s, d)) = self.buckets[idx].vx {
                    if (s == v || d == v)
                        && self.buckets[idx].list.iter().any(|e| e.in_window(t_b, t_e))
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Sum of outgoing edge weights from `v` within `[t_b, t_e]`.
    pub fn query_vertex_out_weight(&self, v: VertexId, t_b: Timestamp, t_e: Timestamp) -> Weight {
        let mut total: Weight = 0;
        let base_row = self.hasher.map(v, self.dim);
        for row in self.probe_rows(base_row) {
            for col in 0..self.dim {
                let idx = self.index(row, col);
                if let Some((s, _)) = self.buckets[idx].vx {
                    if s == v {
                        total += self.buckets[idx]
                            .list
                            .iter()
                            .filter(|e| e.in_window(t_b, t_e))
                            .map(|e| e.weight)
                            .sum::<Weight>();
                    }
                }
            }
        }
        total
    }

    /// Count of outgoing edges from `v` within `[t_b, t_e]`.
    pub fn query_vertex_out_degree(&self, v: VertexId, t_b: Timestamp, t_e: Timestamp) -> i64 {
        let mut count: i64 = 0;
        let base_row = self.hasher.map(v, self.dim);
        for row in self.probe_rows(base_row) {
            for col in 0..self.dim {
                let idx = self.index(row, col);
                if let Some((s, _)) = self.buckets[idx].vx {
                    if s == v {
                        count += self.buckets[idx]
                            .list
                            .iter()
                            .filter(|e| e.in_window(t_b, t_e))
                            .count() as i64;
                    }
                }
            }
        }
        count
    }

    /// Sums weights across a multiset of directed `(s, d)` pairs, one
    /// matching edge per pair (first match in window wins). Returns `-1`
    /// the moment any pair has no bucket, or no edge in the window.
    pub fn query_subgraph(&self, pairs: &[(VertexId, VertexId)], t_b: Timestamp, t_e: Timestamp) -> i64 {
        let mut total: i64 = 0;
        for &(s, d) in pairs {
            let idx = match self.locate(s, d) {
                Some(idx) => idx,
                None => return -1,
            };
            match self.buckets[idx].list.iter().find(|e| e.in_window(t_b, t_e)) {
                Some(e) => total += e.weight,
                None => return -1,
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::ExpiryStrategy;
    use tgs_common::Edge;

    fn vid(n: i32) -> VertexId {
        VertexId::new(n).unwrap()
    }

    #[test]
    fn scenario_one_basic_insert_and_query() {
        let mut m = Matrix::with_dim(10, 1);
        m.insert(Edge::new(1, 2, 10, 1).unwrap());

        assert!(m.query_edge(vid(1), vid(2), 0, 3));
        assert_eq!(m.query_vertex_out_weight(vid(1), 0, 3), 10);
        assert_eq!(m.query_vertex_out_degree(vid(1), 0, 3), 1);
    }

    #[test]
    fn scenario_two_rolling_expiry_clears_edge() {
        let mut m = Matrix::with_dim(10, 1);
        m.insert(Edge::new(1, 2, 10, 1).unwrap());
        m.expire(2, ExpiryStrategy::Rolling);

        assert!(!m.query_edge(vid(1), vid(2), 0, 3));
        assert!(m.hp.is_none());
    }

    #[test]
    fn scenario_five_subgraph_match_then_broken_by_expiry() {
        let mut m = Matrix::with_dim(32, 1);
        m.insert(Edge::new(1, 2, 4, 1).unwrap());
        m.insert(Edge::new(2, 3, 6, 2).unwrap());

        let s = vec![(vid(1), vid(2)), (vid(2), vid(3))];
        assert_eq!(m.query_subgraph(&s, 0, 5), 10);

        m.expire(
            2,
            ExpiryStrategy::Lazy {
                source: vid(2),
                destination: vid(3),
            },
        );
        assert_eq!(m.query_subgraph(&s, 0, 5), -1);
    }

    #[test]
    fn malformed_window_falls_through_naturally() {
        let mut m = Matrix::with_dim(10, 1);
        m.insert(Edge::new(1, 2, 10, 1).unwrap());

        assert!(!m.query_edge(vid(1), vid(2), 5, 0));
        assert_eq!(m.query_vertex_out_weight(vid(1), 5, 0), 0);
        assert_eq!(m.query_vertex_out_degree(vid(1), 5, 0), 0);
        assert_eq!(m.query_subgraph(&[(vid(1), vid(2))], 5, 0), -1);
    }

    #[test]
    fn vertex_presence_finds_source_and_incidental_destination_hits() {
        let mut m = Matrix::with_dim(10, 1);
        m.insert(Edge::new(1, 2, 10, 1).unwrap());
        assert!(m.query_vertex_presence(vid(1), 0, 3));
    }
}
