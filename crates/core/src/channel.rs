//! Binary symmetric channel simulation.
//!
//! Two ways to disturb a byte stream:
//!
//! - [`apply_noise`]: XOR a precomputed noise stream onto the data. A noise
//!   bit of 1 flips the corresponding data bit; 0 leaves it alone. This is
//!   the file-against-file channel: noise comes from somewhere else (e.g. a
//!   generated Bernoulli stream).
//! - [`BinarySymmetricChannel`]: flip each transmitted bit independently
//!   with a configured crossover probability, drawing from a seeded RNG.
//!
//! # Determinism
//!
//! All randomness comes from a seeded ChaCha8 RNG. Given the same seed and
//! inputs, the flipped bit pattern is identical across runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// XOR `noise` onto `input`, byte by byte.
///
/// A shorter noise stream is zero-extended: bytes past its end pass through
/// unchanged. Output length always equals input length.
pub fn apply_noise(input: &[u8], noise: &[u8]) -> Vec<u8> {
    input
        .iter()
        .enumerate()
        .map(|(i, &byte)| byte ^ noise.get(i).copied().unwrap_or(0))
        .collect()
}

/// Configuration for a binary symmetric channel.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// Probability that any single bit is flipped, in [0.0, 1.0]
    pub crossover: f64,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// A channel that never corrupts anything.
    pub fn perfect(seed: u64) -> Self {
        Self {
            crossover: 0.0,
            seed,
        }
    }
}

/// Memoryless bit-flipping channel with crossover probability `p`.
///
/// # Thread Safety
/// Not thread-safe; use one instance per thread or synchronize externally.
pub struct BinarySymmetricChannel {
    config: ChannelConfig,
    rng: ChaCha8Rng,

    // Statistics
    bits_transmitted: u64,
    bits_flipped: u64,
}

impl BinarySymmetricChannel {
    /// Create a channel with the given configuration.
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            bits_transmitted: 0,
            bits_flipped: 0,
        }
    }

    /// Push a buffer through the channel and return the disturbed copy.
    ///
    /// Every bit of every byte rolls against the crossover probability.
    /// Statistics accumulate across calls.
    pub fn transmit(&mut self, data: &[u8]) -> Vec<u8> {
        let mut output = Vec::with_capacity(data.len());

        for &byte in data {
            let mut received = byte;
            for bit in 0..8 {
                self.bits_transmitted += 1;
                if self.config.crossover > 0.0 && self.rng.gen::<f64>() < self.config.crossover {
                    received ^= 1 << bit;
                    self.bits_flipped += 1;
                }
            }
            output.push(received);
        }

        output
    }

    /// Snapshot of channel behavior so far.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            bits_transmitted: self.bits_transmitted,
            bits_flipped: self.bits_flipped,
        }
    }
}

/// Statistics about channel behavior.
#[derive(Debug, Clone, Copy)]
pub struct ChannelStats {
    /// Total bits pushed through the channel
    pub bits_transmitted: u64,

    /// Bits actually flipped
    pub bits_flipped: u64,
}

impl ChannelStats {
    /// Observed crossover rate (flipped / transmitted).
    pub fn observed_rate(&self) -> f64 {
        if self.bits_transmitted == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / self.bits_transmitted as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_noise_flips_marked_bits() {
        let input = [0b1111_0000, 0b0000_1111];
        let noise = [0b0000_0001, 0b1000_0000];

        let output = apply_noise(&input, &noise);
        assert_eq!(output, vec![0b1111_0001, 0b1000_1111]);
    }

    #[test]
    fn test_apply_noise_zero_extends_short_noise() {
        let input = [0xAA, 0xBB, 0xCC];
        let noise = [0xFF];

        let output = apply_noise(&input, &noise);
        assert_eq!(output, vec![0x55, 0xBB, 0xCC]);
    }

    #[test]
    fn test_apply_noise_is_involutive() {
        let input = b"channel round trip".to_vec();
        let noise: Vec<u8> = (0..input.len() as u8).collect();

        let disturbed = apply_noise(&input, &noise);
        assert_eq!(apply_noise(&disturbed, &noise), input);
    }

    #[test]
    fn test_perfect_channel_passes_through() {
        let mut channel = BinarySymmetricChannel::new(ChannelConfig::perfect(42));
        let data = b"untouched by noise";

        assert_eq!(channel.transmit(data), data);
        let stats = channel.stats();
        assert_eq!(stats.bits_transmitted, data.len() as u64 * 8);
        assert_eq!(stats.bits_flipped, 0);
    }

    #[test]
    fn test_crossover_rate_is_approximate() {
        let config = ChannelConfig {
            crossover: 0.25,
            seed: 42,
        };
        let mut channel = BinarySymmetricChannel::new(config);
        channel.transmit(&vec![0u8; 10_000]);

        let rate = channel.stats().observed_rate();
        assert!(rate > 0.2 && rate < 0.3, "observed rate {rate}");
    }

    #[test]
    fn test_determinism() {
        let config = ChannelConfig {
            crossover: 0.1,
            seed: 12345,
        };
        let data: Vec<u8> = (0..=255).collect();

        let mut first = BinarySymmetricChannel::new(config);
        let mut second = BinarySymmetricChannel::new(config);

        assert_eq!(first.transmit(&data), second.transmit(&data));
        assert_eq!(
            first.stats().bits_flipped,
            second.stats().bits_flipped
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let data = vec![0u8; 512];

        let mut first = BinarySymmetricChannel::new(ChannelConfig {
            crossover: 0.2,
            seed: 1,
        });
        let mut second = BinarySymmetricChannel::new(ChannelConfig {
            crossover: 0.2,
            seed: 2,
        });

        assert_ne!(first.transmit(&data), second.transmit(&data));
    }
}
