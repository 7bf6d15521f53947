//! Page replacement victim selection.
//!
//! All four algorithms pick a victim *frame* from the allocated list:
//! - **FIFO** — oldest `load_time` among resident pages.
//! - **LRU** — oldest `last_access_time`.
//! - **OPT** — farthest next use in the future-reference stream (a page
//!   never used again is infinitely far); degrades to LRU when no stream
//!   was configured.
//! - **Clock** — second-chance walk over the allocated ring: a clear
//!   reference bit selects the frame, a set bit is cleared in passing. A
//!   full revolution that clears every bit falls back to the frame the
//!   walk started at.
//!
//! Scans visit frames in allocation order, so ties resolve deterministically.

use tracing::trace;

use crate::common::error::{Result, SimError};
use crate::config::PageReplacement;

use super::VirtualMemory;

impl VirtualMemory {
    /// Picks the frame to evict according to the configured algorithm.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfMemory`] when no frame is allocated; unreachable
    /// once a validated instance has faulted at least once.
    pub(super) fn select_victim(&mut self) -> Result<u32> {
        if self.allocated.is_empty() {
            return Err(SimError::OutOfMemory);
        }

        let frame = match self.config.replacement {
            PageReplacement::Fifo => self.victim_by_key(|entry| entry.load_time),
            PageReplacement::Lru => self.victim_by_key(|entry| entry.last_access_time),
            PageReplacement::Opt => self.victim_opt(),
            PageReplacement::Clock => self.victim_clock(),
        };
        trace!(frame, algorithm = ?self.config.replacement, "victim selected");
        Ok(frame)
    }

    /// Allocated frame whose resident page minimises `key`; first minimum
    /// wins on ties.
    fn victim_by_key(&self, key: impl Fn(&super::PageTableEntry) -> u64) -> u32 {
        let mut victim = self.allocated[0];
        let mut best = u64::MAX;
        for &frame in &self.allocated {
            if let Some(entry) = self.resident_entry(frame) {
                let k = key(entry);
                if k < best {
                    best = k;
                    victim = frame;
                }
            }
        }
        victim
    }

    /// Belady's algorithm over the future stream from the current cursor.
    fn victim_opt(&mut self) -> u32 {
        let Some(future) = self.future.as_deref() else {
            // No lookahead available; silently degrade, but record it so
            // callers can detect the misconfiguration.
            self.opt_fallback = true;
            return self.victim_by_key(|entry| entry.last_access_time);
        };

        let upcoming = &future[self.cursor.min(future.len())..];
        let mut victim = self.allocated[0];
        let mut farthest = 0_usize;
        for &frame in &self.allocated {
            let Some(vpn) = self.frame_to_vpn[frame as usize] else {
                continue;
            };
            let distance = upcoming
                .iter()
                .position(|&v| v == vpn)
                .unwrap_or(usize::MAX);
            if distance == usize::MAX {
                // Never used again; no candidate can beat this.
                return frame;
            }
            if distance > farthest {
                farthest = distance;
                victim = frame;
            }
        }
        victim
    }

    /// Second-chance ring walk.
    fn victim_clock(&mut self) -> u32 {
        let len = self.allocated.len();
        let start = self.clock_hand % len;
        let mut hand = start;

        for _ in 0..len {
            let frame = self.allocated[hand];
            if let Some(vpn) = self.frame_to_vpn[frame as usize] {
                let Some(entry) = self.page_table.get_mut(&vpn) else {
                    hand = (hand + 1) % len;
                    continue;
                };
                if entry.referenced {
                    entry.referenced = false;
                } else {
                    self.clock_hand = (hand + 1) % len;
                    return frame;
                }
            }
            hand = (hand + 1) % len;
        }

        // Every page had its bit set; the full revolution cleared them all,
        // so the frame the walk started at is the victim.
        self.clock_hand = (start + 1) % len;
        self.allocated[start]
    }

    fn resident_entry(&self, frame: u32) -> Option<&super::PageTableEntry> {
        let vpn = self.frame_to_vpn[frame as usize]?;
        self.page_table.get(&vpn)
    }
}
