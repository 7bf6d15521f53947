//! Translation Lookaside Buffer.
//!
//! A flat 64-entry translation cache searched linearly. Entries age through
//! a caller-supplied timestamp; when the table is full the entry with the
//! oldest `last_access_time` is evicted (LRU within the TLB).

use crate::common::constants::TLB_SIZE;

/// One cached translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TlbEntry {
    /// Virtual page number.
    pub vpn: u32,
    /// Physical frame number.
    pub pfn: u32,
    /// Entry holds a live translation.
    pub valid: bool,
    /// Timestamp of the most recent lookup hit or insertion.
    pub last_access_time: u64,
}

/// The translation lookaside buffer.
#[derive(Debug, Clone)]
pub struct Tlb {
    entries: [TlbEntry; TLB_SIZE],
}

impl Tlb {
    /// Creates an empty TLB.
    pub const fn new() -> Self {
        Self {
            entries: [TlbEntry {
                vpn: 0,
                pfn: 0,
                valid: false,
                last_access_time: 0,
            }; TLB_SIZE],
        }
    }

    /// Looks up `vpn`, refreshing the entry's access time on a hit.
    ///
    /// # Returns
    ///
    /// The cached frame number, or `None` on a miss.
    pub fn lookup(&mut self, vpn: u32, now: u64) -> Option<u32> {
        self.entries
            .iter_mut()
            .find(|e| e.valid && e.vpn == vpn)
            .map(|e| {
                e.last_access_time = now;
                e.pfn
            })
    }

    /// Installs or refreshes the translation `vpn → pfn`.
    ///
    /// An existing entry for `vpn` is overwritten in place; otherwise a free
    /// slot is used, and with none available the least recently used entry
    /// is evicted.
    pub fn update(&mut self, vpn: u32, pfn: u32, now: u64) {
        let slot = if let Some(pos) = self.entries.iter().position(|e| e.valid && e.vpn == vpn) {
            pos
        } else if let Some(free) = self.entries.iter().position(|e| !e.valid) {
            free
        } else {
            // Full: evict the stalest translation.
            let mut victim = 0;
            let mut oldest = u64::MAX;
            for (i, e) in self.entries.iter().enumerate() {
                if e.last_access_time < oldest {
                    oldest = e.last_access_time;
                    victim = i;
                }
            }
            victim
        };

        self.entries[slot] = TlbEntry {
            vpn,
            pfn,
            valid: true,
            last_access_time: now,
        };
    }

    /// Drops the translation for `vpn` if one is cached.
    pub fn invalidate(&mut self, vpn: u32) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.valid && e.vpn == vpn) {
            e.valid = false;
        }
    }

    /// Drops every cached translation.
    pub fn flush(&mut self) {
        for e in &mut self.entries {
            e.valid = false;
        }
    }

    /// Returns the live entries, for invariant checks.
    pub fn valid_entries(&self) -> impl Iterator<Item = &TlbEntry> {
        self.entries.iter().filter(|e| e.valid)
    }
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new()
    }
}
