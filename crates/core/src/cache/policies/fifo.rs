//! First-In, First-Out (FIFO) replacement policy.
//!
//! Evicts the line with the oldest `load_time` stamp. The cache records that
//! stamp only when a line is filled, never on a hit, so residency order is
//! what decides eviction regardless of how often a line is reused.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(W) scan over the ways.
//! - **Hardware Cost:** Low - a per-set fill pointer suffices in silicon.
//! - **Worst Case:** Hot lines evicted purely for being old (Belady's
//!   anomaly is observable with this policy).

use super::lru::min_by_key_way;
use super::{CacheLine, ReplacementPolicy};

/// FIFO policy; stateless, the fill order lives in the line metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn select_victim(&mut self, lines: &[CacheLine]) -> usize {
        min_by_key_way(lines, |line| line.load_time)
    }
}
