//! Seeded PRNG threaded explicitly through probabilistic operations.
//!
//! Leak formation is the only random process in the irrigation simulation.
//! Callers own a [`SimRng`] and pass it by `&mut` into the leak check, so a
//! run can be replayed exactly from the seed and the saved aggregate.
//!
//! The generator is SplitMix64: 8 bytes of state, no platform-dependent
//! behavior, trivially serializable alongside a save.

use crate::fixed::Fixed64;
use serde::{Deserialize, Serialize};

/// SplitMix64 pseudo-random number generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` with 32 fractional bits.
    pub fn next_fraction(&mut self) -> Fixed64 {
        let upper = self.next_u64() >> 32;
        Fixed64::from_bits(upper as i64)
    }

    /// Returns `true` with the given probability.
    ///
    /// Probabilities at or below 0 never fire and never consume state;
    /// probabilities at or above 1 always fire and never consume state.
    pub fn chance(&mut self, probability: Fixed64) -> bool {
        if probability <= Fixed64::ZERO {
            return false;
        }
        if probability >= Fixed64::ONE {
            return true;
        }
        self.next_fraction() < probability
    }

    /// Internal state, for hashing saves and asserting replay parity.
    pub fn state(&self) -> u64 {
        self.state
    }
}
