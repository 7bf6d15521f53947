//! Least Recently Used (LRU) replacement policy.
//!
//! Evicts the line whose `access_time` stamp is oldest. The cache refreshes
//! that stamp on every hit and fill, so the minimum identifies the way that
//! has gone unused the longest.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(W) scan over the ways.
//! - **Best Case:** Workloads with strong temporal locality.
//! - **Worst Case:** Cyclic scans slightly larger than the set (thrashing).

use super::{CacheLine, ReplacementPolicy};

/// LRU policy; stateless, the age lives in the line metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn select_victim(&mut self, lines: &[CacheLine]) -> usize {
        min_by_key_way(lines, |line| line.access_time)
    }
}

/// Index of the way minimising `key`; the first minimum wins on ties.
pub(super) fn min_by_key_way(lines: &[CacheLine], key: impl Fn(&CacheLine) -> u64) -> usize {
    let mut victim = 0;
    let mut best = u64::MAX;
    for (way, line) in lines.iter().enumerate() {
        let k = key(line);
        if k < best {
            best = k;
            victim = way;
        }
    }
    victim
}
