//! Random replacement policy.
//!
//! Evicts a pseudo-randomly selected way. Uses a deterministic xorshift
//! generator so simulation runs are repeatable.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(1).
//! - **Hardware Cost:** Minimal - an LFSR.
//! - **Behaviour:** No pathological access pattern, but no exploitation of
//!   locality either.

use crate::units::Xorshift32;

use super::{CacheLine, ReplacementPolicy};

/// Random policy holding its generator state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy {
    rng: Xorshift32,
}

impl RandomPolicy {
    /// Creates the policy with an explicit seed for reproducible runs.
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            rng: Xorshift32::new(seed),
        }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn select_victim(&mut self, lines: &[CacheLine]) -> usize {
        self.rng.next_below(lines.len() as u32) as usize
    }
}
