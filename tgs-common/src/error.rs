//! # Shared Error Type
//!
//! One error enum, shared by every crate in the workspace, so the core
//! sketch, the reference engine, the CLI, and the bench harness all agree
//! on what can go wrong and how it is reported.

use thiserror::Error;

/// Errors surfaced by the core sketch and its ambient collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TgsError {
    /// Vertex id `0` is reserved as the free-bucket sentinel and is rejected
    /// at the boundary of any operation that accepts a vertex id.
    #[error("vertex identifier 0 is reserved and cannot be used")]
    InvalidIdentifier,
    /// `dim` or `memory_budget_bytes` produced a matrix with no usable rows.
    #[error("matrix dimension must be at least 1, got {0}")]
    InvalidDimension(usize),
    /// A dataset line could not be parsed into a temporal edge.
    #[error("malformed input at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// Convenience alias used throughout the workspace.
pub type TgsResult<T> = Result<T, TgsError>;
