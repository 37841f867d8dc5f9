//! # Edge & Vertex Identifier Types
//!
//! Core data types shared by the sketch, the ground-truth reference engine,
//! and every ambient collaborator (dataset loader, CLI, bench harness).
//!
//! ## Design Principles
//!
//! 1. **Non-zero vertex ids**: `0` is reserved as the "empty bucket" sentinel
//!    throughout the sketch, so `VertexId` can never hold it.
//! 2. **Value types**: `Edge` is an immutable, `Copy` record — cheap to push
//!    by value into a bucket's edge list and cheap to hand to the reference
//!    engine for cross-checking.
//! 3. **Caller-defined time units**: `Timestamp` is a bare monotonically
//!    non-decreasing `i64`; the sketch never interprets its units.

use std::fmt;

use crate::error::TgsError;

/// Edge weight. Signed so that callers may encode negated/penalized edges.
pub type Weight = i64;

/// Logical timestamp, monotonically non-decreasing across an insertion
/// sequence. Units are entirely up to the caller (seconds, ticks, ...).
pub type Timestamp = i64;

/// A non-zero vertex identifier.
///
/// `0` is excluded from the input domain: it is the sentinel the sketch uses
/// to mark a free bucket, so constructing a `VertexId` from `0` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(i32);

impl VertexId {
    /// Creates a `VertexId`, rejecting the reserved `0` sentinel.
    #[inline]
    pub fn new(id: i32) -> Result<Self, TgsError> {
        if id == 0 {
            return Err(TgsError::InvalidIdentifier);
        }
        Ok(VertexId(id))
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for VertexId {
    type Error = TgsError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        VertexId::new(value)
    }
}

/// An immutable directed, timestamped, weighted edge observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: VertexId,
    pub destination: VertexId,
    pub weight: Weight,
    pub time: Timestamp,
}

impl Edge {
    /// Builds an edge from raw vertex ids, rejecting id `0` on either end.
    pub fn new(
        source: i32,
        destination: i32,
        weight: Weight,
        time: Timestamp,
    ) -> Result<Self, TgsError> {
        Ok(Edge {
            source: VertexId::new(source)?,
            destination: VertexId::new(destination)?,
            weight,
            time,
        })
    }

    /// The `(source, destination)` identity this edge would occupy a bucket
    /// under — used by both the sketch and the reference engine to group
    /// edges sharing the same directed vertex pair.
    #[inline]
    pub fn identity(&self) -> (VertexId, VertexId) {
        (self.source, self.destination)
    }

    /// Whether this edge's timestamp lies in the closed window `[t_b, t_e]`.
    #[inline]
    pub fn in_window(&self, t_b: Timestamp, t_e: Timestamp) -> bool {
        self.time >= t_b && self.time <= t_e
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_vertex_id() {
        assert_eq!(VertexId::new(0), Err(TgsError::InvalidIdentifier));
        assert!(VertexId::new(1).is_ok());
        assert!(VertexId::new(-1).is_ok());
    }

    #[test]
    fn edge_window_membership() {
        let e = Edge::new(1, 2, 10, 5).unwrap();
        assert!(e.in_window(0, 10));
        assert!(e.in_window(5, 5));
        assert!(!e.in_window(6, 10));
        assert!(!e.in_window(0, 4));
    }
}
