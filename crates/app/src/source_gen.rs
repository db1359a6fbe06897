//! Synthetic source generation (discrete memoryless source).
//!
//! Samples a message of independent symbols from a probability mass
//! function by inverting the cumulative distribution: draw a uniform
//! number, find the first symbol whose cumulative mass exceeds it.
//!
//! All draws come from a seeded ChaCha8 RNG, so the same seed and PMF
//! always produce the same message.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sample `length` bytes distributed according to `pmf`.
///
/// Symbols with zero probability never appear. The PMF is assumed
/// normalized (see the `pmf` module); a slightly off total only skews the
/// last nonzero symbol.
pub fn generate_message(pmf: &[f64; 256], length: usize, seed: u64) -> Vec<u8> {
    let mut cumulative = [0.0f64; 256];
    let mut running = 0.0;
    for (slot, &p) in cumulative.iter_mut().zip(pmf.iter()) {
        running += p;
        *slot = running;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..length)
        .map(|_| {
            let draw: f64 = rng.gen();
            // First symbol with cumulative mass above the draw
            cumulative.partition_point(|&mass| mass <= draw).min(255) as u8
        })
        .collect()
}
