use serde::{Deserialize, Serialize};

/// Source of randomness for food placement and particle bursts.
pub trait RandomGenerator {
    fn random_u64(&mut self) -> u64;

    /// Uniform value in [0.0, 1.0)
    fn random_f64(&mut self) -> f64 {
        // 53 significant bits fit an f64 mantissa exactly
        (self.random_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in [0, bound). Returns 0 when `bound` is 0.
    fn random_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        (self.random_f64() * bound as f64) as u32
    }
}

// Simple pseudorandom number generator using xorshift algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoRandom {
    state: u64,
}

impl PseudoRandom {
    pub fn new(seed: u64) -> Self {
        // Ensure we don't start with 0 state as xorshift doesn't work with 0
        let state = if seed == 0 { 0x1234567890abcdef } else { seed };
        PseudoRandom { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

impl RandomGenerator for PseudoRandom {
    fn random_u64(&mut self) -> u64 {
        self.next_u64()
    }
}
