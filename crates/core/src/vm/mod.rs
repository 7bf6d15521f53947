//! Paged virtual-memory simulator.
//!
//! Translates 32-bit virtual addresses through a 64-entry TLB and a sparse
//! page table over at most 256 physical frames. Covers:
//! 1. **Translation:** TLB lookup, page-table walk, and the derived physical
//!    address (`frame << 12 | offset`).
//! 2. **Fault handling:** Frame allocation from the free list, or page
//!    replacement (FIFO / LRU / OPT / Clock) when memory is full.
//! 3. **Timing model:** A derived average access time from the configured
//!    TLB, memory, and fault-penalty constants.
//!
//! The page table is a sparse map keyed by VPN; replacement scans visit
//! frames in allocation order, which is deterministic and reproducible.

/// Translation lookaside buffer.
pub mod tlb;

mod replacement;

use std::collections::HashMap;

use tracing::debug;

use crate::common::addr::{PhysAddr, VirtAddr};
use crate::common::error::{Result, SimError};
use crate::config::VmConfig;

pub use tlb::{Tlb, TlbEntry};

/// One page-table entry, keyed by VPN in the sparse table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTableEntry {
    /// Physical frame holding the page.
    pub frame_number: u32,
    /// Entry maps a resident page.
    pub valid: bool,
    /// Page was written since it was loaded.
    pub dirty: bool,
    /// Page was touched since the bit was last cleared (Clock consumes this).
    pub referenced: bool,
    /// Page is protected from eviction (reserved; never set by the core).
    pub protected: bool,
    /// Timestamp of the fault that loaded the page.
    pub load_time: u64,
    /// Timestamp of the most recent access.
    pub last_access_time: u64,
    /// Accesses since the page was loaded.
    pub access_count: u64,
}

/// Monotonic counters accumulated by the VM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmStats {
    /// Counted translations (forced re-translations are not double counted).
    pub total_accesses: u64,
    /// Translations served by the TLB.
    pub tlb_hits: u64,
    /// Translations that had to walk the page table.
    pub tlb_misses: u64,
    /// Translations that found the page resident (including TLB hits).
    pub page_hits: u64,
    /// Translations that faulted.
    pub page_faults: u64,
    /// Faults that had to evict a resident page.
    pub page_replacements: u64,
}

impl VmStats {
    /// Fraction of accesses served by the TLB.
    pub fn tlb_hit_rate(&self) -> f64 {
        self.rate(self.tlb_hits)
    }

    /// Fraction of accesses that found the page resident.
    pub fn page_hit_rate(&self) -> f64 {
        self.rate(self.page_hits)
    }

    /// Fraction of accesses that faulted.
    pub fn page_fault_rate(&self) -> f64 {
        self.rate(self.page_faults)
    }

    fn rate(&self, count: u64) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            count as f64 / self.total_accesses as f64
        }
    }
}

/// The virtual-memory simulator.
#[derive(Debug)]
pub struct VirtualMemory {
    config: VmConfig,
    page_table: HashMap<u32, PageTableEntry>,
    /// Unallocated frames; lowest number is handed out first.
    free_frames: Vec<u32>,
    /// Frames in allocation order. A replaced frame keeps its slot, so the
    /// list doubles as the Clock ring.
    allocated: Vec<u32>,
    /// Resident VPN per frame, indexed by frame number.
    frame_to_vpn: Vec<Option<u32>>,
    tlb: Tlb,
    /// Clock hand, a position within `allocated`.
    clock_hand: usize,
    /// Optional future-reference stream (VPNs) consumed by OPT.
    future: Option<Vec<u32>>,
    /// Position in the future stream; advances once per counted access.
    cursor: usize,
    opt_fallback: bool,
    current_time: u64,
    stats: VmStats,
}

impl VirtualMemory {
    /// Builds a VM instance with all frames free and an empty page table.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::InvalidParam`] from [`VmConfig::validate`].
    pub fn new(config: VmConfig) -> Result<Self> {
        config.validate()?;

        // Reversed so pop() hands out frame 0 first.
        let free_frames: Vec<u32> = (0..config.total_frames).rev().collect();
        let frame_to_vpn = vec![None; config.total_frames as usize];

        Ok(Self {
            config,
            page_table: HashMap::new(),
            free_frames,
            allocated: Vec::new(),
            frame_to_vpn,
            tlb: Tlb::new(),
            clock_hand: 0,
            future: None,
            cursor: 0,
            opt_fallback: false,
            stats: VmStats::default(),
            current_time: 0,
        })
    }

    /// Returns the configuration the VM was built from.
    pub const fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Supplies the ordered VPN stream OPT replacement looks ahead into.
    ///
    /// The cursor starts at the beginning and advances once per counted
    /// translation, so the stream should mirror the accesses the caller is
    /// about to issue.
    pub fn set_future_stream(&mut self, vpns: Vec<u32>) {
        self.future = Some(vpns);
        self.cursor = 0;
    }

    /// Reports whether OPT ever degraded to LRU because no future stream was
    /// configured.
    pub const fn opt_fallback_used(&self) -> bool {
        self.opt_fallback
    }

    /// Non-faulting translation.
    ///
    /// Counts the access and returns the physical address when the TLB or
    /// the page table resolves it; a fault is counted and reported as
    /// `None`, leaving residency untouched.
    pub fn translate(&mut self, vaddr: VirtAddr) -> Option<PhysAddr> {
        self.translate_inner(vaddr, true)
    }

    /// Faulting translation.
    ///
    /// Falls back to [`Self::handle_page_fault`] on a miss, then re-resolves
    /// the address without counting the access a second time.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfMemory`] when replacement cannot produce a victim;
    /// unreachable under a validated configuration.
    pub fn translate_force(&mut self, vaddr: VirtAddr) -> Result<PhysAddr> {
        if let Some(paddr) = self.translate_inner(vaddr, true) {
            return Ok(paddr);
        }
        self.handle_page_fault(vaddr.vpn())?;
        self.translate_inner(vaddr, false)
            .ok_or(SimError::OutOfMemory)
    }

    /// Loads `vpn` into a frame, evicting a resident page if none is free.
    ///
    /// The new entry starts clean and referenced, and the TLB is primed with
    /// the fresh translation.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfMemory`] when there is neither a free frame nor a
    /// victim; unreachable under a validated configuration.
    pub fn handle_page_fault(&mut self, vpn: u32) -> Result<u32> {
        let frame = if let Some(free) = self.free_frames.pop() {
            self.allocated.push(free);
            free
        } else {
            let victim_frame = self.select_victim()?;
            if let Some(victim_vpn) = self.frame_to_vpn[victim_frame as usize] {
                debug!(victim_vpn, victim_frame, "page replaced");
                let _ = self.page_table.remove(&victim_vpn);
                self.tlb.invalidate(victim_vpn);
                self.stats.page_replacements += 1;
            }
            victim_frame
        };

        let entry = PageTableEntry {
            frame_number: frame,
            valid: true,
            dirty: false,
            referenced: true,
            protected: false,
            load_time: self.current_time,
            last_access_time: self.current_time,
            access_count: 0,
        };
        let _ = self.page_table.insert(vpn, entry);
        self.frame_to_vpn[frame as usize] = Some(vpn);
        self.tlb.update(vpn, frame, self.current_time);
        debug!(vpn, frame, "page loaded");
        Ok(frame)
    }

    /// Drops every cached TLB translation; the page table is untouched.
    pub fn flush_tlb(&mut self) {
        self.tlb.flush();
    }

    /// Clears the counters; residency, TLB, and replacement state are kept.
    pub fn reset_stats(&mut self) {
        self.stats = VmStats::default();
    }

    /// Returns a snapshot of the accumulated counters.
    pub const fn stats(&self) -> VmStats {
        self.stats
    }

    /// Derived mean access time in nanoseconds, per the configured timing
    /// constants: TLB hits cost one TLB probe, resident pages a probe plus a
    /// memory access, faults a probe plus the fault penalty.
    pub fn average_access_time_ns(&self) -> f64 {
        let tlb = self.config.tlb_access_ns as f64;
        let memory = tlb + self.config.memory_access_ns as f64;
        let fault = tlb + self.config.fault_penalty_us as f64 * 1000.0;
        self.stats.tlb_hit_rate() * tlb
            + self.stats.page_hit_rate() * memory
            + self.stats.page_fault_rate() * fault
    }

    /// Free frames, for invariant checks.
    pub fn free_frames(&self) -> &[u32] {
        &self.free_frames
    }

    /// Allocated frames in allocation order, for invariant checks.
    pub fn allocated_frames(&self) -> &[u32] {
        &self.allocated
    }

    /// Looks up the page-table entry for `vpn`.
    pub fn page_table_entry(&self, vpn: u32) -> Option<&PageTableEntry> {
        self.page_table.get(&vpn)
    }

    /// The VPN currently resident in `frame`, if any.
    pub fn resident_vpn(&self, frame: u32) -> Option<u32> {
        self.frame_to_vpn.get(frame as usize).copied().flatten()
    }

    /// Live TLB entries, for invariant checks.
    pub fn tlb_entries(&self) -> impl Iterator<Item = &TlbEntry> {
        self.tlb.valid_entries()
    }

    fn translate_inner(&mut self, vaddr: VirtAddr, update_stats: bool) -> Option<PhysAddr> {
        let vpn = vaddr.vpn();

        if update_stats {
            self.current_time += 1;
            self.stats.total_accesses += 1;
            if self.future.is_some() {
                self.cursor += 1;
            }
        }

        if let Some(pfn) = self.tlb.lookup(vpn, self.current_time) {
            if update_stats {
                self.stats.tlb_hits += 1;
                self.stats.page_hits += 1;
            }
            self.touch_pte(vpn);
            return Some(PhysAddr::from_frame(pfn, vaddr.page_offset()));
        }

        if update_stats {
            self.stats.tlb_misses += 1;
        }

        match self.page_table.get(&vpn) {
            Some(entry) if entry.valid => {
                let pfn = entry.frame_number;
                if update_stats {
                    self.stats.page_hits += 1;
                }
                self.touch_pte(vpn);
                self.tlb.update(vpn, pfn, self.current_time);
                Some(PhysAddr::from_frame(pfn, vaddr.page_offset()))
            }
            _ => {
                if update_stats {
                    self.stats.page_faults += 1;
                }
                None
            }
        }
    }

    /// Refreshes the PTE's reference metadata; runs on TLB hits too, so the
    /// replacement algorithms see every access.
    fn touch_pte(&mut self, vpn: u32) {
        let now = self.current_time;
        if let Some(entry) = self.page_table.get_mut(&vpn) {
            entry.referenced = true;
            entry.last_access_time = now;
            entry.access_count += 1;
        }
    }
}
