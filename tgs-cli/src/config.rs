//! # Layered CLI Configuration
//!
//! Matrix sizing and expiry knobs are accepted as CLI flags with
//! environment-variable fallbacks, in the same layered style this
//! codebase's server binary resolves its own listen address and worker
//! count: explicit flag wins, then environment, then a hardcoded default.

use std::env;

use tgs_common::config::{DEFAULT_CHAIN_G, DEFAULT_EXPIRATION_THRESHOLD};
use tgs_common::SketchConfig;

/// Resolves a [`SketchConfig`] from explicit CLI flags, falling back to
/// environment variables and finally to the shared defaults.
pub fn resolve_sketch_config(
    dim: Option<usize>,
    memory_budget_bytes: Option<usize>,
    chain_g: Option<usize>,
    expiration_threshold: Option<i64>,
) -> SketchConfig {
    SketchConfig {
        dim: dim.or_else(|| env_parse("TGS_DIM")),
        memory_budget_bytes: memory_budget_bytes
            .or_else(|| env_parse("TGS_MEMORY_BUDGET_BYTES"))
            .or(Some(20 * 1024 * 1024)),
        chain_g: chain_g
            .or_else(|| env_parse("TGS_CHAIN_G"))
            .unwrap_or(DEFAULT_CHAIN_G),
        expiration_threshold: expiration_threshold
            .or_else(|| env_parse("TGS_EXPIRATION_THRESHOLD"))
            .unwrap_or(DEFAULT_EXPIRATION_THRESHOLD),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| raw.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_win_over_defaults() {
        let cfg = resolve_sketch_config(Some(50), None, Some(2), Some(99));
        assert_eq!(cfg.dim, Some(50));
        assert_eq!(cfg.chain_g, 2);
        assert_eq!(cfg.expiration_threshold, 99);
    }

    #[test]
    fn falls_back_to_shared_defaults() {
        // SAFETY: test-only, single-threaded, no other test reads these keys.
        unsafe {
            env::remove_var("TGS_DIM");
            env::remove_var("TGS_CHAIN_G");
            env::remove_var("TGS_EXPIRATION_THRESHOLD");
        }
        let cfg = resolve_sketch_config(None, None, None, None);
        assert_eq!(cfg.chain_g, DEFAULT_CHAIN_G);
        assert_eq!(cfg.expiration_threshold, DEFAULT_EXPIRATION_THRESHOLD);
    }
}
