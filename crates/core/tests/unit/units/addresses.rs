//! # Address Arithmetic Tests
//!
//! Verifies the `VirtAddr` and `PhysAddr` newtypes: page-number and offset
//! extraction, frame recombination, and the split/recombine round trip.

use archlab_core::common::addr::{PhysAddr, VirtAddr};
use proptest::prelude::*;

#[test]
fn vpn_of_page_aligned_address() {
    let va = VirtAddr(0x0040_3000);
    assert_eq!(va.vpn(), 0x403);
    assert_eq!(va.page_offset(), 0);
}

#[test]
fn page_offset_is_lower_twelve_bits() {
    let va = VirtAddr(0x1234_5ABC);
    assert_eq!(va.page_offset(), 0xABC);
}

#[test]
fn max_address_splits_cleanly() {
    let va = VirtAddr(u32::MAX);
    assert_eq!(va.vpn(), 0xF_FFFF);
    assert_eq!(va.page_offset(), 0xFFF);
}

#[test]
fn phys_addr_from_frame_and_offset() {
    let pa = PhysAddr::from_frame(0x12, 0x34);
    assert_eq!(pa, PhysAddr(0x0001_2034));
    assert_eq!(pa.pfn(), 0x12);
    assert_eq!(pa.page_offset(), 0x34);
}

#[test]
fn from_frame_masks_oversized_offset() {
    let pa = PhysAddr::from_frame(1, 0x1FFF);
    assert_eq!(pa.page_offset(), 0xFFF);
}

proptest! {
    /// Splitting any virtual address and recombining the parts as a
    /// physical address is the identity on the raw bits.
    #[test]
    fn split_recombine_round_trip(raw in any::<u32>()) {
        let va = VirtAddr(raw);
        let pa = PhysAddr::from_frame(va.vpn(), va.page_offset());
        prop_assert_eq!(pa.0, raw);
    }
}
