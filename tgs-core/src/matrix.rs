//! # Matrix & Insertion Protocol
//!
//! The sketch itself: an N×N array of buckets, threaded by a virtual queue
//! of occupied buckets, with chain-hashing compensation absorbing hash
//! collisions within a bounded probe window.
//!
//! ## Design Principles
//!
//! 1. **Arena-plus-index virtual queue**: the queue's head/middle/tail
//!    cursors and each bucket's forward/backward links are plain `usize`
//!    indices into the flat bucket array, not raw pointers — the matrix
//!    keeps sole ownership of every bucket.
//! 2. **Shared probe order**: reads and writes both probe row offsets
//!    `0..=g` in the same order, via `Matrix::probe_rows`, so their
//!    placement policies can never disagree.
//! 3. **One type, defined once**: `Bucket`, `Edge`, and the matrix are each
//!    declared exactly once in this crate, rather than copy-pasted per
//!    call site.

use tgs_common::{Edge, SketchConfig, TgsError, VertexId};

use crate::bucket::Bucket;
use crate::diagnostics::Diagnostics;
use crate::hash::HashMapper;

/// Outcome of a single `insert` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The edge claimed a previously free bucket.
    Claimed,
    /// The edge was appended to a bucket it shares an identity with.
    Reused,
    /// Every candidate cell in the compensation window was occupied by an
    /// unrelated identity; the edge was dropped.
    Overflow,
}

/// The N×N bucket matrix and its virtual queue of occupied buckets.
#[derive(Debug)]
pub struct Matrix {
    pub(crate) buckets: Vec<Bucket>,
    pub(crate) dim: usize,
    pub(crate) chain_g: usize,
    pub(crate) hp: Option<usize>,
    pub(crate) mp: Option<usize>,
    pub(crate) tp: Option<usize>,
    pub(crate) hasher: HashMapper,
    pub(crate) diagnostics: Diagnostics,
}

impl Matrix {
    /// Builds a matrix sized from a [`SketchConfig`], deriving `N` from
    /// either an explicit `dim` or a memory budget.
    pub fn new(config: SketchConfig) -> Result<Self, TgsError> {
        let dim = config.resolve_dim(std::mem::size_of::<Bucket>())?;
        Ok(Self::with_dim(dim, config.chain_g))
    }

    /// Builds a matrix with an explicit side `N` and compensation window
    /// `g`. `dim == 0` is a programmer error and panics by contract, rather
    /// than returning a runtime error — see the design's error policy.
    pub fn with_dim(dim: usize, chain_g: usize) -> Self {
        assert!(dim > 0, "matrix dimension must be at least 1");
        Matrix {
            buckets: (0..dim * dim).map(|_| Bucket::free()).collect(),
            dim,
            chain_g,
            hp: None,
            mp: None,
            tp: None,
            hasher: HashMapper::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Matrix side `N`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Chain-hashing compensation window `g`.
    #[inline]
    pub fn chain_g(&self) -> usize {
        self.chain_g
    }

    /// Current insertion/overflow counters.
    #[inline]
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Average occupied-bucket chain length (edges per non-empty bucket).
    pub fn avg_chain_length(&self) -> f32 {
        let mut chains = 0u32;
        let mut total = 0u64;
        for bucket in &self.buckets {
            if !bucket.list.is_empty() {
                chains += 1;
                total += bucket.list.len() as u64;
            }
        }
        if chains == 0 {
            0.0
        } else {
            total as f32 / chains as f32
        }
    }

    #[inline]
    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        row * self.dim + col
    }

    /// Yields the candidate row sequence `(H(s)+k) mod N` for `k = 0..=g`,
    /// shared by both insertion and every read so their placement policies
    /// agree by construction.
    #[inline]
    pub(crate) fn probe_rows(&self, base_row: usize) -> impl Iterator<Item = usize> + '_ {
        (0..=self.chain_g).map(move |k| (base_row + k) % self.dim)
    }

    /// Locates the bucket owning `(s, d)`, if any, scanning the shared
    /// probe sequence on the row axis.
    pub(crate) fn locate(&self, s: VertexId, d: VertexId) -> Option<usize> {
        let base_row = self.hasher.map(s, self.dim);
        let col = self.hasher.map(d, self.dim);
        for row in self.probe_rows(base_row) {
            let idx = self.index(row, col);
            if self.buckets[idx].vx == Some((s, d)) {
                return Some(idx);
            }
        }
        None
    }

    /// Inserts `edge`, placing it via chain-hashing compensation.
    pub fn insert(&mut self, edge: Edge) -> InsertOutcome {
        let base_row = self.hasher.map(edge.source, self.dim);
        let col = self.hasher.map(edge.destination, self.dim);
        let identity = edge.identity();

        for row in self.probe_rows(base_row) {
            let idx = self.index(row, col);
            if self.buckets[idx].vx == Some(identity) {
                self.buckets[idx].list.push_back(edge);
                self.buckets[idx].gt = edge.time;
                self.diagnostics.reuses += 1;
                return InsertOutcome::Reused;
            } else if self.buckets[idx].is_free() {
                self.buckets[idx].vx = Some(identity);
                self.buckets[idx].cf = true;
                self.buckets[idx].list.push_back(edge);
                self.buckets[idx].gt = edge.time;
                self.queue_push_tail(idx);
                self.diagnostics.claims += 1;
                return InsertOutcome::Claimed;
            } else {
                self.buckets[idx].cf = false;
            }
        }

        self.diagnostics.overflows += 1;
        tracing::warn!(
            source = %edge.source,
            destination = %edge.destination,
            g = self.chain_g,
            "insertion overflow: compensation window exhausted"
        );
        InsertOutcome::Overflow
    }

    /// Splices a newly-claimed bucket onto the tail of the virtual queue.
    pub(crate) fn queue_push_tail(&mut self, idx: usize) {
        self.buckets[idx].prev = self.tp;
        self.buckets[idx].bqp = None;
        match self.tp {
            Some(tp) => self.buckets[tp].bqp = Some(idx),
            None => {
                self.hp = Some(idx);
                self.mp = Some(idx);
            }
        }
        self.tp = Some(idx);
    }

    /// Unlinks a bucket from the virtual queue and resets it to free.
    /// Works for a bucket anywhere in the queue, using the back-link to
    /// avoid a predecessor scan.
    pub(crate) fn queue_unlink(&mut self, idx: usize) {
        let prev = self.buckets[idx].prev;
        let next = self.buckets[idx].bqp;

        match prev {
            Some(p) => self.buckets[p].bqp = next,
            None => self.hp = next,
        }
        match next {
            Some(n) => self.buckets[n].prev = prev,
            None => self.tp = prev,
        }
        if self.mp == Some(idx) {
            self.mp = next;
        }

        self.buckets[idx].reset();
    }
}
