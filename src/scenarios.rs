// In: src/scenarios.rs

//! Deterministic dataset generators for the bench and validate harnesses.
//!
//! Both generators take an explicit seed so that every run of the harness
//! measures the same arrays. The skewed generator models the overflow
//! packer's target shape: almost everything small, a thin tail of outliers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::WordpackError;

/// Seed used by the CLI when none is given.
pub const DEFAULT_SEED: u64 = 123;

/// `n` values drawn uniformly from `[0, 2^k)`.
pub fn uniform_u32(n: usize, k: u32, seed: u64) -> Result<Vec<u32>, WordpackError> {
    if k > 32 {
        return Err(WordpackError::ConfigError(format!(
            "uniform scenario needs k <= 32, got {}",
            k
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let limit = 1u64 << k;
    Ok((0..n).map(|_| rng.random_range(0..limit) as u32).collect())
}

/// `n` values, each drawn from `[0, 2^k_small)` except that with probability
/// `ratio_large` it comes from `[2^k_small, 2^k_large)` instead.
pub fn skewed(
    n: usize,
    k_small: u32,
    k_large: u32,
    ratio_large: f64,
    seed: u64,
) -> Result<Vec<u32>, WordpackError> {
    if k_small >= k_large {
        return Err(WordpackError::ConfigError(format!(
            "skewed scenario needs k_small < k_large, got {} >= {}",
            k_small, k_large
        )));
    }
    if k_large > 32 {
        return Err(WordpackError::ConfigError(format!(
            "skewed scenario needs k_large <= 32, got {}",
            k_large
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let small_lim = 1u64 << k_small;
    let large_lim = 1u64 << k_large;
    Ok((0..n)
        .map(|_| {
            if rng.random::<f64>() < ratio_large {
                rng.random_range(small_lim..large_lim) as u32
            } else {
                rng.random_range(0..small_lim) as u32
            }
        })
        .collect())
}

//==================================================================================
// Unit Tests
//==================================================================================
