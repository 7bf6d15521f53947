//! # TLB Tests
//!
//! Round-trip, eviction and invalidation behaviour of the 64-entry TLB.

use archlab_core::common::constants::TLB_SIZE;
use archlab_core::vm::tlb::Tlb;

#[test]
fn update_then_lookup_round_trip() {
    let mut tlb = Tlb::new();
    tlb.update(0x40, 7, 1);
    assert_eq!(tlb.lookup(0x40, 2), Some(7));

    tlb.invalidate(0x40);
    assert_eq!(tlb.lookup(0x40, 3), None);
}

#[test]
fn update_overwrites_existing_mapping() {
    let mut tlb = Tlb::new();
    tlb.update(0x40, 7, 1);
    tlb.update(0x40, 9, 2);
    assert_eq!(tlb.lookup(0x40, 3), Some(9));
    assert_eq!(tlb.valid_entries().count(), 1);
}

#[test]
fn full_tlb_evicts_least_recently_used_entry() {
    let mut tlb = Tlb::new();
    for vpn in 0..TLB_SIZE as u32 {
        tlb.update(vpn, vpn + 100, u64::from(vpn) + 1);
    }

    // Refresh entry 0 so entry 1 is the oldest.
    assert!(tlb.lookup(0, 1000).is_some());
    tlb.update(9999, 1, 1001);

    assert!(tlb.lookup(0, 1002).is_some());
    assert_eq!(tlb.lookup(1, 1003), None);
    assert_eq!(tlb.lookup(9999, 1004), Some(1));
}

#[test]
fn flush_drops_every_entry() {
    let mut tlb = Tlb::new();
    for vpn in 0..8 {
        tlb.update(vpn, vpn, u64::from(vpn));
    }
    tlb.flush();
    assert_eq!(tlb.valid_entries().count(), 0);
}

#[test]
fn lookup_refreshes_recency() {
    let mut tlb = Tlb::new();
    for vpn in 0..TLB_SIZE as u32 {
        tlb.update(vpn, vpn, u64::from(vpn) + 1);
    }

    // Touch the oldest entry, then insert: the second-oldest goes instead.
    assert!(tlb.lookup(0, 2000).is_some());
    tlb.update(5000, 0, 2001);
    assert!(tlb.lookup(0, 2002).is_some());
}
