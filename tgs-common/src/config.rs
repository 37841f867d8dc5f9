//! # Sketch Construction Configuration
//!
//! Resolved parameters used to size and tune a sketch matrix, shared by the
//! core, the CLI, and the bench harness so all three agree on defaults.

use crate::error::TgsError;

/// Default chain-hashing compensation window.
pub const DEFAULT_CHAIN_G: usize = 1;

/// Default eviction threshold, in caller time units (e.g. seconds).
pub const DEFAULT_EXPIRATION_THRESHOLD: i64 = 100 * 86_400;

/// Construction parameters for a sketch matrix.
///
/// Either `dim` or `memory_budget_bytes` determines the matrix side `N`;
/// `dim` takes precedence when both are set.
#[derive(Debug, Clone, Copy)]
pub struct SketchConfig {
    /// Explicit matrix side, overrides `memory_budget_bytes` when set.
    pub dim: Option<usize>,
    /// Memory budget in bytes, used to derive `dim` when `dim` is unset.
    pub memory_budget_bytes: Option<usize>,
    /// Chain-hashing compensation window `g`.
    pub chain_g: usize,
    /// Default expiration threshold used to compute an eviction horizon
    /// from "now" (`Te = now - expiration_threshold`).
    pub expiration_threshold: i64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig {
            dim: None,
            memory_budget_bytes: Some(20 * 1024 * 1024),
            chain_g: DEFAULT_CHAIN_G,
            expiration_threshold: DEFAULT_EXPIRATION_THRESHOLD,
        }
    }
}

impl SketchConfig {
    /// Resolves the configured matrix side given the size of one bucket.
    ///
    /// `N = floor(sqrt(budget / bucket_bytes))`, unless `dim` was set
    /// explicitly.
    pub fn resolve_dim(&self, bucket_bytes: usize) -> Result<usize, TgsError> {
        let dim = if let Some(dim) = self.dim {
            dim
        } else {
            let budget = self.memory_budget_bytes.unwrap_or(0);
            ((budget / bucket_bytes.max(1)) as f64).sqrt() as usize
        };

        if dim == 0 {
            return Err(TgsError::InvalidDimension(dim));
        }
        Ok(dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_dim_from_budget() {
        let cfg = SketchConfig {
            dim: None,
            memory_budget_bytes: Some(1_000_000),
            chain_g: 1,
            expiration_threshold: 10,
        };
        // bucket_bytes chosen so the sqrt comes out even for the test.
        let dim = cfg.resolve_dim(1_000).unwrap();
        assert_eq!(dim, 31); // floor(sqrt(1000))
    }

    #[test]
    fn explicit_dim_overrides_budget() {
        let cfg = SketchConfig {
            dim: Some(10),
            memory_budget_bytes: Some(1),
            chain_g: 1,
            expiration_threshold: 10,
        };
        assert_eq!(cfg.resolve_dim(1_000).unwrap(), 10);
    }

    #[test]
    fn rejects_zero_dimension() {
        let cfg = SketchConfig {
            dim: None,
            memory_budget_bytes: Some(0),
            chain_g: 1,
            expiration_threshold: 10,
        };
        assert!(matches!(
            cfg.resolve_dim(1_000),
            Err(TgsError::InvalidDimension(0))
        ));
    }
}
