//! Least Frequently Used (LFU) replacement policy.
//!
//! Evicts the line with the smallest `access_count`; ties fall to the line
//! with the oldest `access_time`, so among equally cold lines the least
//! recent one goes first.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(W) scan over the ways.
//! - **Worst Case:** A formerly hot line can pin itself in the set long
//!   after its reuse stops (count is never decayed).

use super::{CacheLine, ReplacementPolicy};

/// LFU policy; stateless, the counts live in the line metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfuPolicy;

impl ReplacementPolicy for LfuPolicy {
    fn select_victim(&mut self, lines: &[CacheLine]) -> usize {
        let mut victim = 0;
        let mut best = (u64::MAX, u64::MAX);
        for (way, line) in lines.iter().enumerate() {
            let k = (line.access_count, line.access_time);
            if k < best {
                best = k;
                victim = way;
            }
        }
        victim
    }
}
