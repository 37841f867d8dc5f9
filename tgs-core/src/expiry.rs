//! # Expiry Engine
//!
//! Three strategies share one contract: after expiry with horizon `Te`, no
//! reachable edge satisfies `time <= Te`, and every bucket with `ec == 0`
//! is free and absent from the virtual queue. They are exposed as a single
//! `expire` entry point parameterized by an [`ExpiryStrategy`] tag rather
//! than three separate functions, so the strategy is a value, not a name.

use tgs_common::{Timestamp, VertexId};

use crate::matrix::Matrix;

/// Which expiry strategy to run, and any strategy-specific input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStrategy {
    /// Walks the virtual queue from the head, draining and unlinking
    /// exhausted buckets until it reaches one still holding live data.
    Rolling,
    /// Visits every cell of the matrix and rebuilds the virtual queue from
    /// scratch. O(N²); the safe fallback.
    FullScan,
    /// Expires a single bucket, located the same way a read would.
    Lazy { source: VertexId, destination: VertexId },
}

/// Counts produced by a single `expire` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiryReport {
    pub edges_dropped: u64,
    pub buckets_freed: u64,
}

impl Matrix {
    /// Runs one expiry pass with horizon `te` under `strategy`.
    pub fn expire(&mut self, te: Timestamp, strategy: ExpiryStrategy) -> ExpiryReport {
        let report = match strategy {
            ExpiryStrategy::Rolling => self.expire_rolling(te),
            ExpiryStrategy::FullScan => self.expire_full(te),
            ExpiryStrategy::Lazy {
                source,
                destination,
            } => self.expire_lazy(source, destination, te),
        };
        tracing::debug!(
            ?strategy,
            te,
            edges_dropped = report.edges_dropped,
            buckets_freed = report.buckets_freed,
            "expiry sweep complete"
        );
        report
    }

    /// Rolling-out expiry: walks forward from the head of the virtual
    /// queue, which by invariant is always the oldest still-occupied
    /// bucket, draining and unlinking exhausted buckets until it reaches
    /// one whose front edge is still live. That bucket becomes the new
    /// middle cursor, marking the frontier between confirmed-clear and
    /// possibly-live buckets.
    ///
    /// The walk always starts at the head rather than resuming from the
    /// previous middle cursor: `Te` is not guaranteed monotone across
    /// calls from the caller's point of view for this sketch's contract,
    /// and the head is already the correct resume point since everything
    /// before it is already unlinked. This keeps the strategy's
    /// "no edge with time <= Te survives" guarantee intact on every call,
    /// not just the first.
    pub(crate) fn expire_rolling(&mut self, te: Timestamp) -> ExpiryReport {
        let mut report = ExpiryReport::default();
        let mut cur = self.hp;
        let mut new_mp = None;

        while let Some(idx) = cur {
            report.edges_dropped += self.buckets[idx].drain_expired(te) as u64;
            let next = self.buckets[idx].bqp;

            if self.buckets[idx].list.is_empty() {
                self.queue_unlink(idx);
                report.buckets_freed += 1;
                cur = next;
            } else {
                new_mp = Some(idx);
                break;
            }
        }

        self.mp = new_mp.or(self.hp);
        report
    }

    /// Full-scan expiry: visits every cell, drops leading expired edges,
    /// frees emptied buckets, and rebuilds the virtual queue in scan order.
    pub(crate) fn expire_full(&mut self, te: Timestamp) -> ExpiryReport {
        let mut report = ExpiryReport::default();
        self.hp = None;
        self.mp = None;
        self.tp = None;

        for idx in 0..self.buckets.len() {
            report.edges_dropped += self.buckets[idx].drain_expired(te) as u64;

            if self.buckets[idx].list.is_empty() {
                if !self.buckets[idx].is_free() {
                    report.buckets_freed += 1;
                }
                self.buckets[idx].reset();
            } else {
                self.queue_push_tail(idx);
            }
        }

        self.mp = self.hp;
        report
    }

    /// Lazy expiry: drains a single bucket, located exactly the way a read
    /// would, and unlinks it from the virtual queue if it becomes empty.
    /// Never touches the middle cursor.
    pub(crate) fn expire_lazy(
        &mut self,
        source: VertexId,
        destination: VertexId,
        te: Timestamp,
    ) -> ExpiryReport {
        let mut report = ExpiryReport::default();
        if let Some(idx) = self.locate(source, destination) {
            report.edges_dropped += self.buckets[idx].drain_expired(te) as u64;
            if self.buckets[idx].list.is_empty() {
                self.queue_unlink(idx);
                report.buckets_freed += 1;
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgs_common::Edge;

    #[test]
    fn rolling_drops_expired_and_frees_bucket() {
        let mut m = Matrix::with_dim(10, 1);
        m.insert(Edge::new(1, 2, 10, 1).unwrap());

        let report = m.expire(2, ExpiryStrategy::Rolling);
        assert_eq!(report.edges_dropped, 1);
        assert_eq!(report.buckets_freed, 1);
        assert!(m.hp.is_none());
        assert!(!m.query_edge(VertexId::new(1).unwrap(), VertexId::new(2).unwrap(), 0, 3));
    }

    #[test]
    fn rolling_stops_at_first_live_bucket() {
        let mut m = Matrix::with_dim(64, 1);
        m.insert(Edge::new(1, 2, 1, 1).unwrap()); // will expire
        m.insert(Edge::new(3, 4, 1, 10).unwrap()); // stays live

        let report = m.expire(2, ExpiryStrategy::Rolling);
        assert_eq!(report.buckets_freed, 1);
        assert!(m.query_edge(VertexId::new(3).unwrap(), VertexId::new(4).unwrap(), 0, 20));
    }

    #[test]
    fn lazy_expiry_drops_only_target_bucket() {
        let mut m = Matrix::with_dim(10, 1);
        m.insert(Edge::new(1, 2, 5, 1).unwrap());
        m.insert(Edge::new(1, 2, 7, 4).unwrap());

        let s = VertexId::new(1).unwrap();
        let d = VertexId::new(2).unwrap();
        assert_eq!(m.query_vertex_out_weight(s, 0, 5), 12);

        m.expire(2, ExpiryStrategy::Lazy { source: s, destination: d });
        assert_eq!(m.query_vertex_out_weight(s, 0, 5), 7);
    }

    #[test]
    fn full_scan_clears_everything_and_rebuilds_queue() {
        let mut m = Matrix::with_dim(32, 1);
        m.insert(Edge::new(1, 2, 1, 1).unwrap());
        m.insert(Edge::new(2, 3, 1, 2).unwrap());
        m.insert(Edge::new(3, 4, 1, 10).unwrap());

        let report = m.expire(5, ExpiryStrategy::FullScan);
        assert_eq!(report.buckets_freed, 2);
        assert!(m.query_edge(VertexId::new(3).unwrap(), VertexId::new(4).unwrap(), 0, 20));
        assert!(!m.query_edge(VertexId::new(1).unwrap(), VertexId::new(2).unwrap(), 0, 20));
    }

    #[test]
    fn idempotent_expiry() {
        let mut m = Matrix::with_dim(10, 1);
        m.insert(Edge::new(1, 2, 10, 1).unwrap());
        m.expire(2, ExpiryStrategy::Rolling);
        let second = m.expire(2, ExpiryStrategy::Rolling);
        assert_eq!(second.edges_dropped, 0);
        assert_eq!(second.buckets_freed, 0);
    }
}
